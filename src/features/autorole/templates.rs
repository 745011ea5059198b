//! # Template Catalog
//!
//! Named snapshots of a guild's autorole lists, capped per guild and stored in
//! their own JSON document.

use crate::core::AutoroleError;
use crate::database::{JsonDocument, StorageError};
use crate::features::autorole::category::RoleId;
use crate::features::autorole::store::TenantConfig;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Maximum saved templates per guild
pub const TEMPLATE_LIMIT: usize = 10;

/// Opaque template identifier (UUID v4 string)
pub type TemplateId = String;

/// A template as stored under its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    #[serde(rename = "humans", default)]
    pub human_roles: Vec<RoleId>,
    #[serde(rename = "bots", default)]
    pub automated_roles: Vec<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Per-guild save order, one past the highest sequence present at save time
    #[serde(default)]
    pub seq: u64,
}

/// Persisted shape: guild id -> template id -> record
pub type TemplateDocument = HashMap<String, HashMap<TemplateId, TemplateRecord>>;

/// A template together with its id, as returned by listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub human_roles: Vec<RoleId>,
    pub automated_roles: Vec<RoleId>,
    pub saved_at: Option<DateTime<Utc>>,
    pub seq: u64,
}

impl Template {
    fn from_record(id: &str, record: &TemplateRecord) -> Self {
        Template {
            id: id.to_string(),
            name: record.name.clone(),
            human_roles: record.human_roles.clone(),
            automated_roles: record.automated_roles.clone(),
            saved_at: record.saved_at,
            seq: record.seq,
        }
    }

    /// The live configuration this template restores
    pub fn to_config(&self) -> TenantConfig {
        TenantConfig {
            human_roles: self.human_roles.clone(),
            automated_roles: self.automated_roles.clone(),
        }
    }
}

pub struct TemplateCatalog {
    document: JsonDocument<TemplateDocument>,
    data: RwLock<TemplateDocument>,
}

impl TemplateCatalog {
    pub fn open(document: JsonDocument<TemplateDocument>) -> Result<Self, StorageError> {
        let data = document.load()?;
        let total: usize = data.values().map(HashMap::len).sum();
        info!(
            "Loaded {total} autorole template(s) for {} guild(s) from {}",
            data.len(),
            document.path().display()
        );
        Ok(TemplateCatalog {
            document,
            data: RwLock::new(data),
        })
    }

    /// Store `snapshot` under a fresh id.
    ///
    /// Returns `Ok(None)` when the guild already has [`TEMPLATE_LIMIT`] templates.
    pub fn save(
        &self,
        tenant: &str,
        name: &str,
        snapshot: &TenantConfig,
    ) -> Result<Option<TemplateId>, AutoroleError> {
        if name.trim().is_empty() {
            return Err(AutoroleError::EmptyTemplateName);
        }

        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if guard.get(tenant).map_or(0, HashMap::len) >= TEMPLATE_LIMIT {
            debug!("Guild {tenant}: template catalog full ({TEMPLATE_LIMIT})");
            return Ok(None);
        }

        let id = Uuid::new_v4().to_string();
        let mut next = guard.clone();
        let catalog = next.entry(tenant.to_string()).or_default();
        let seq = catalog.values().map(|record| record.seq).max().unwrap_or(0) + 1;
        catalog.insert(
            id.clone(),
            TemplateRecord {
                name: name.to_string(),
                human_roles: snapshot.human_roles.clone(),
                automated_roles: snapshot.automated_roles.clone(),
                saved_at: Some(Utc::now()),
                seq,
            },
        );
        self.document.replace(&next)?;
        *guard = next;

        info!("Guild {tenant}: saved autorole template '{name}' as {id}");
        Ok(Some(id))
    }

    /// All templates for the guild in save order. Records written without a
    /// sequence number sort first, by save time and then id.
    pub fn list(&self, tenant: &str) -> Vec<Template> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let mut templates: Vec<Template> = guard
            .get(tenant)
            .map(|catalog| {
                catalog
                    .iter()
                    .map(|(id, record)| Template::from_record(id, record))
                    .collect()
            })
            .unwrap_or_default();
        templates.sort_by(|a, b| {
            a.seq
                .cmp(&b.seq)
                .then_with(|| a.saved_at.cmp(&b.saved_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        templates
    }

    pub fn get(&self, tenant: &str, template_id: &str) -> Option<Template> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(tenant)
            .and_then(|catalog| catalog.get(template_id))
            .map(|record| Template::from_record(template_id, record))
    }

    pub fn count(&self, tenant: &str) -> usize {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(tenant).map_or(0, HashMap::len)
    }

    /// Remove a template. Returns `false` when the guild or id is unknown.
    pub fn delete(&self, tenant: &str, template_id: &str) -> Result<bool, AutoroleError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let known = guard
            .get(tenant)
            .is_some_and(|catalog| catalog.contains_key(template_id));
        if !known {
            return Ok(false);
        }

        let mut next = guard.clone();
        if let Some(catalog) = next.get_mut(tenant) {
            catalog.remove(template_id);
        }
        self.document.replace(&next)?;
        *guard = next;

        info!("Guild {tenant}: deleted autorole template {template_id}");
        Ok(true)
    }
}
