//! Facade over the configuration store and template catalog.

use crate::core::{AutoroleError, Config};
use crate::database::{JsonDocument, StorageError};
use crate::features::autorole::category::{RoleCategory, RoleId};
use crate::features::autorole::store::{ConfigStore, TenantConfig};
use crate::features::autorole::templates::{Template, TemplateCatalog, TemplateId};
use log::{debug, info};
use std::path::PathBuf;

pub struct AutoroleManager {
    store: ConfigStore,
    templates: TemplateCatalog,
}

impl AutoroleManager {
    /// Load both documents. Missing files start empty.
    pub fn open(
        config_path: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Result<Self, StorageError> {
        Ok(AutoroleManager {
            store: ConfigStore::open(JsonDocument::new(config_path))?,
            templates: TemplateCatalog::open(JsonDocument::new(template_path))?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        Self::open(config.config_path(), config.template_path())
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn get_roles(&self, tenant: &str, category: RoleCategory) -> Vec<RoleId> {
        self.store.get_roles(tenant, category)
    }

    pub fn get_config(&self, tenant: &str) -> TenantConfig {
        self.store.get_config(tenant)
    }

    pub fn check_limit(&self, tenant: &str, category: RoleCategory) -> (bool, usize) {
        self.store.check_limit(tenant, category)
    }

    pub fn add_role(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_id: RoleId,
    ) -> Result<(), AutoroleError> {
        self.store.add_role(tenant, category, role_id)
    }

    pub fn add_roles(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_ids: &[RoleId],
    ) -> Result<Vec<RoleId>, AutoroleError> {
        self.store.add_roles(tenant, category, role_ids)
    }

    pub fn remove_role(
        &self,
        tenant: &str,
        category: RoleCategory,
        role_id: RoleId,
    ) -> Result<(), AutoroleError> {
        self.store.remove_role(tenant, category, role_id)
    }

    pub fn reset_tenant(&self, tenant: &str) -> Result<(), AutoroleError> {
        self.store.reset_tenant(tenant)
    }

    /// Snapshot the guild's current lists as a new template.
    /// `Ok(None)` means the guild has no free template slot.
    pub fn save_template(
        &self,
        tenant: &str,
        name: &str,
    ) -> Result<Option<TemplateId>, AutoroleError> {
        let snapshot = self.store.get_config(tenant);
        self.templates.save(tenant, name, &snapshot)
    }

    pub fn list_templates(&self, tenant: &str) -> Vec<Template> {
        self.templates.list(tenant)
    }

    pub fn get_template(&self, tenant: &str, template_id: &str) -> Option<Template> {
        self.templates.get(tenant, template_id)
    }

    /// Overwrite the guild's live lists with a saved template.
    /// Returns `false` when the guild or template is unknown.
    pub fn load_template(&self, tenant: &str, template_id: &str) -> Result<bool, AutoroleError> {
        let Some(template) = self.templates.get(tenant, template_id) else {
            debug!("Guild {tenant}: no template {template_id} to load");
            return Ok(false);
        };
        self.store.replace_tenant(tenant, template.to_config())?;
        info!(
            "Guild {tenant}: loaded autorole template '{}' ({template_id})",
            template.name
        );
        Ok(true)
    }

    pub fn delete_template(&self, tenant: &str, template_id: &str) -> Result<bool, AutoroleError> {
        self.templates.delete(tenant, template_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::autorole::templates::TEMPLATE_LIMIT;
    use tempfile::TempDir;

    fn open_manager(dir: &TempDir) -> AutoroleManager {
        AutoroleManager::open(
            dir.path().join("autorole.json"),
            dir.path().join("autorole_templates.json"),
        )
        .unwrap()
    }

    #[test]
    fn test_template_round_trip_after_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        manager
            .add_roles("1", RoleCategory::Human, &[10, 20])
            .unwrap();
        manager.add_role("1", RoleCategory::Automated, 30).unwrap();
        let id = manager.save_template("1", "n").unwrap().unwrap();

        manager.remove_role("1", RoleCategory::Human, 10).unwrap();
        manager.add_role("1", RoleCategory::Human, 40).unwrap();
        manager.add_role("1", RoleCategory::Automated, 50).unwrap();

        assert!(manager.load_template("1", &id).unwrap());
        assert_eq!(manager.get_roles("1", RoleCategory::Human), vec![10, 20]);
        assert_eq!(manager.get_roles("1", RoleCategory::Automated), vec![30]);
    }

    #[test]
    fn test_save_reset_load_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        manager
            .add_roles("1", RoleCategory::Human, &[10, 20, 30])
            .unwrap();
        manager
            .add_roles("1", RoleCategory::Automated, &[40, 50])
            .unwrap();
        let before = manager.get_config("1");

        let id = manager.save_template("1", "backup").unwrap().unwrap();
        manager.reset_tenant("1").unwrap();
        assert!(manager.get_config("1").is_empty());

        assert!(manager.load_template("1", &id).unwrap());
        assert_eq!(manager.get_config("1"), before);
    }

    #[test]
    fn test_loaded_template_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let manager = open_manager(&dir);
            manager.add_role("1", RoleCategory::Human, 10).unwrap();
            let id = manager.save_template("1", "t").unwrap().unwrap();
            manager.reset_tenant("1").unwrap();
            assert!(manager.load_template("1", &id).unwrap());
            id
        };

        let manager = open_manager(&dir);
        assert_eq!(manager.get_roles("1", RoleCategory::Human), vec![10]);
        assert!(manager.get_template("1", &id).is_some());
    }

    #[test]
    fn test_load_overwrites_rather_than_merges() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        let id = manager.save_template("1", "empty").unwrap().unwrap();
        manager.add_role("1", RoleCategory::Human, 10).unwrap();

        assert!(manager.load_template("1", &id).unwrap());
        assert!(manager.get_roles("1", RoleCategory::Human).is_empty());
    }

    #[test]
    fn test_load_unknown_template() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);
        manager.add_role("1", RoleCategory::Human, 10).unwrap();
        let id = manager.save_template("1", "t").unwrap().unwrap();

        assert!(!manager.load_template("1", "missing").unwrap());
        assert!(!manager.load_template("2", &id).unwrap());
        assert!(manager.get_config("2").is_empty());
        assert_eq!(manager.get_roles("1", RoleCategory::Human), vec![10]);
    }

    #[test]
    fn test_failed_template_load_leaves_config_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        manager.add_role("1", RoleCategory::Human, 10).unwrap();
        let id = manager.save_template("1", "t").unwrap().unwrap();
        manager.add_role("1", RoleCategory::Human, 20).unwrap();
        let before = manager.get_config("1");

        let path = dir.path().join("autorole.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), "x").unwrap();

        let err = manager.load_template("1", &id).unwrap_err();
        assert!(matches!(err, AutoroleError::Storage(_)));
        assert_eq!(manager.get_config("1"), before);
    }

    #[test]
    fn test_template_catalog_full() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        for i in 0..TEMPLATE_LIMIT {
            manager.save_template("1", &format!("t{i}")).unwrap().unwrap();
        }
        assert!(manager.save_template("1", "t10").unwrap().is_none());
        assert_eq!(manager.list_templates("1").len(), TEMPLATE_LIMIT);

        let first = manager.list_templates("1")[0].id.clone();
        assert!(manager.delete_template("1", &first).unwrap());
        assert!(manager.save_template("1", "t10").unwrap().is_some());
    }

    #[test]
    fn test_listing_carries_captured_roles() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        manager.add_role("1", RoleCategory::Automated, 7).unwrap();
        let id = manager.save_template("1", "bots only").unwrap().unwrap();

        let listed = manager.list_templates("1");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].name, "bots only");
        assert!(listed[0].human_roles.is_empty());
        assert_eq!(listed[0].automated_roles, vec![7]);
    }

    #[test]
    fn test_limit_invariant_under_mixed_operations() {
        let dir = tempfile::tempdir().unwrap();
        let manager = open_manager(&dir);

        for role in 0..20u64 {
            for category in RoleCategory::ALL {
                let _ = manager.add_role("1", category, role);
                if role % 3 == 0 {
                    manager.remove_role("1", category, role / 2).unwrap();
                }
                assert!(manager.get_roles("1", category).len() <= category.max_roles());
            }
        }
    }
}
