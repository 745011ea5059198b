//! # Feature: Autorole
//!
//! Per-guild roles granted automatically to members on join, with separate lists
//! for humans (max 5) and bots (max 2), plus up to 10 named templates per guild
//! that snapshot and restore both lists.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Templates record their save time and list oldest first
//! - 1.1.0: Added template catalog (save, list, load, delete)
//! - 1.0.0: Initial release with human and bot autorole lists

pub mod assignment;
pub mod category;
pub mod manager;
pub mod store;
pub mod templates;

pub use assignment::{apply_join_roles, roles_for_member, JoinOutcome, RoleGrantor};
pub use category::{RoleCategory, RoleId, BOT_ROLE_LIMIT, HUMAN_ROLE_LIMIT};
pub use manager::AutoroleManager;
pub use store::{ConfigDocument, ConfigStore, TenantConfig};
pub use templates::{
    Template, TemplateCatalog, TemplateDocument, TemplateId, TemplateRecord, TEMPLATE_LIMIT,
};
