//! Path-bound JSON documents with load / replace-all semantics.

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        StorageError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A JSON file holding one whole document of type `T`.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so a reader never sees a partially written document.
#[derive(Debug, Clone)]
pub struct JsonDocument<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. A missing file is an empty document.
    pub fn load(&self) -> Result<T, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "📄 No document at {} - starting empty",
                    self.path.display()
                );
                return Ok(T::default());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::json(&self.path, e))
    }

    /// Replace the whole document on disk.
    pub fn replace(&self, value: &T) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

        let json =
            serde_json::to_vec_pretty(value).map_err(|e| StorageError::json(&self.path, e))?;

        let mut temp_file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| StorageError::io(parent, e))?;
        temp_file
            .write_all(&json)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|e| StorageError::io(temp_file.path(), e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}
