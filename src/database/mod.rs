//! # Database
//!
//! Whole-document JSON persistence for autorole state. Each document is a single
//! file that is read in full at startup and replaced in full on every write.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with atomic replace-all JSON documents

pub mod document;

pub use document::{JsonDocument, StorageError};
