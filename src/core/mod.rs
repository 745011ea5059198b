//! # Core Module
//!
//! Shared configuration, error types and display helpers for the autorole bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add mentions module for rendering configured roles
//! - 1.0.0: Initial creation with config and error modules

pub mod config;
pub mod error;
pub mod mentions;

// Re-export commonly used items
pub use config::Config;
pub use error::AutoroleError;
pub use mentions::{render_role_mentions, NONE_PLACEHOLDER, NOT_CONFIGURED_PLACEHOLDER};
