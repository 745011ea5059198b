// Core layer - shared config, errors and display helpers
pub mod core;

// Infrastructure - JSON document persistence
pub mod database;

// Features layer
pub mod features;

pub use self::core::{AutoroleError, Config};
pub use database::{JsonDocument, StorageError};
pub use features::autorole::{
    apply_join_roles, AutoroleManager, JoinOutcome, RoleCategory, RoleGrantor, RoleId, Template,
    TemplateId, TenantConfig,
};
