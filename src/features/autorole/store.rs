//! # Configuration Store
//!
//! Authoritative in-memory autorole lists per guild, backed by one JSON document
//! that is rewritten in full after every change.
//!
//! Mutations are copy-on-write: the next document is persisted first and only then
//! swapped in, so a failed write leaves memory equal to what is on disk.

use crate::core::AutoroleError;
use crate::database::{JsonDocument, StorageError};
use crate::features::autorole::category::{RoleCategory, RoleId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Autorole lists for a single guild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    #[serde(rename = "humans", default)]
    pub human_roles: Vec<RoleId>,
    #[serde(rename = "bots", default)]
    pub automated_roles: Vec<RoleId>,
}

impl TenantConfig {
    pub fn roles(&self, category: RoleCategory) -> &[RoleId] {
        match category {
            RoleCategory::Human => &self.human_roles,
            RoleCategory::Automated => &self.automated_roles,
        }
    }

    fn roles_mut(&mut self, category: RoleCategory) -> &mut Vec<RoleId> {
        match category {
            RoleCategory::Human => &mut self.human_roles,
            RoleCategory::Automated => &mut self.automated_roles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.human_roles.is_empty() && self.automated_roles.is_empty()
    }
}

/// Persisted shape: guild id -> lists
pub type ConfigDocument = HashMap<String, TenantConfig>;

pub struct ConfigStore {
    document: JsonDocument<ConfigDocument>,
    data: RwLock<ConfigDocument>,
}

impl ConfigStore {
    /// Load the store from its document. A missing file yields an empty store.
    pub fn open(document: JsonDocument<ConfigDocument>) -> Result<Self, StorageError> {
        let data = document.load()?;
        info!(
            "Loaded autorole config for {} guild(s) from {}",
            data.len(),
            document.path().display()
        );
        Ok(ConfigStore {
            document,
            data: RwLock::new(data),
        })
    }

    /// Roles configured for `category`, in the order they were added.
    /// An unseen guild has no roles.
    pub fn get_roles(&self, tenant: &str, category: RoleCategory) -> Vec<RoleId> {
        self.read(|data| {
            data.get(tenant)
                .map(|config| config.roles(category).to_vec())
                .unwrap_or_default()
        })
    }

    /// Snapshot of both lists for a guild
    pub fn get_config(&self, tenant: &str) -> TenantConfig {
        self.read(|data| data.get(tenant).cloned().unwrap_or_default())
    }

    /// Returns `(at_limit, max)` for the category
    pub fn check_limit(&self, tenant: &str, category: RoleCategory) -> (bool, usize) {
        let max = category.max_roles();
        let len = self.read(|data| data.get(tenant).map_or(0, |c| c.roles(category).len()));
        (len >= max, max)
    }

    /// Append a role. Adding a role that is already configured is a no-op.
    pub fn add_role(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_id: RoleId,
    ) -> Result<(), AutoroleError> {
        self.mutate(|data| {
            let roles = data.entry(tenant.to_string()).or_default().roles_mut(category);
            let max = category.max_roles();
            if roles.len() >= max {
                debug!("Guild {tenant}: {category} autoroles already at limit {max}");
                return Err(AutoroleError::LimitExceeded { category, max });
            }
            if roles.contains(&role_id) {
                return Ok(false);
            }
            roles.push(role_id);
            Ok(true)
        })?;
        Ok(())
    }

    /// Add a multi-role selection in order, stopping at the first limit failure.
    ///
    /// Roles accepted before the failure stay configured. On success returns the
    /// selection as accepted (already configured roles included).
    pub fn add_roles(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_ids: &[RoleId],
    ) -> Result<Vec<RoleId>, AutoroleError> {
        let mut accepted = Vec::with_capacity(role_ids.len());
        for &role_id in role_ids {
            self.add_role(tenant, category, role_id)?;
            accepted.push(role_id);
        }
        Ok(accepted)
    }

    /// Remove a role if configured; otherwise a no-op.
    pub fn remove_role(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_id: RoleId,
    ) -> Result<(), AutoroleError> {
        self.mutate(|data| {
            let Some(config) = data.get_mut(tenant) else {
                return Ok(false);
            };
            let roles = config.roles_mut(category);
            match roles.iter().position(|&id| id == role_id) {
                Some(index) => {
                    roles.remove(index);
                    Ok(true)
                }
                None => Ok(false),
            }
        })?;
        Ok(())
    }

    /// Drop every autorole for the guild. Unknown guilds are a no-op.
    pub fn reset_tenant(&self, tenant: &str) -> Result<(), AutoroleError> {
        let removed = self.mutate(|data| Ok(data.remove(tenant).is_some()))?;
        if removed {
            info!("Guild {tenant}: autorole setup cleared");
        }
        Ok(())
    }

    /// Overwrite both lists for the guild, as when loading a template.
    pub fn replace_tenant(&self, tenant: &str, config: TenantConfig) -> Result<(), AutoroleError> {
        self.mutate(|data| {
            data.insert(tenant.to_string(), config);
            Ok(true)
        })?;
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&ConfigDocument) -> R) -> R {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Apply `f` to a copy of the document. When it reports a change, persist the
    /// copy and then publish it. Returns whether anything changed.
    fn mutate(
        &self,
        f: impl FnOnce(&mut ConfigDocument) -> Result<bool, AutoroleError>,
    ) -> Result<bool, AutoroleError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        if !f(&mut next)? {
            return Ok(false);
        }
        self.document.replace(&next)?;
        *guard = next;
        debug!("Persisted autorole config to {}", self.document.path().display());
        Ok(true)
    }
}
