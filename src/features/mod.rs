//! # Features
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod autorole;

pub use autorole::{AutoroleManager, RoleCategory, RoleGrantor, Template, TenantConfig};
