//! Environment-driven configuration for the autorole bot.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// File name of the live per-guild configuration document
pub const CONFIG_DOCUMENT: &str = "autorole.json";

/// File name of the per-guild template catalog document
pub const TEMPLATE_DOCUMENT: &str = "autorole_templates.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Directory holding both autorole documents
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set in the environment")?;

        Ok(Config {
            discord_token,
            data_dir: env::var("AUTOROLE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("db")),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_DOCUMENT)
    }

    pub fn template_path(&self) -> PathBuf {
        self.data_dir.join(TEMPLATE_DOCUMENT)
    }
}
