//! prompt-vault: local prompt library with JSON import/export
//!
//! The library keeps prompts, categories and a local user identity in a
//! SQLite-backed store, and moves them in and out as portable JSON
//! documents.
//!
//! ## Architecture
//!
//! - **Pure pipeline**: `validation` classifies untrusted import payloads,
//!   `merge` computes id-keyed unions, `export` snapshots collections. None
//!   of these touch storage.
//! - **Store**: `store::VaultStore` owns the collections and is the only
//!   writer; `db` holds one JSON document per collection.
//! - **Commands**: `commands` exposes every operation as a
//!   `"category.action"` JSON command, driven by the `prompt-vault` binary.

// Module declarations
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod ids;
pub mod logging;
pub mod merge;
pub mod models;
pub mod query;
pub mod store;
pub mod validation;

pub use errors::{Result, VaultError};
pub use export::{ExportDocument, APP_IDENTIFIER};
pub use models::{Category, NewCategory, NewPrompt, Prompt, PromptPatch, User};
pub use store::{ImportOutcome, VaultStore};
pub use validation::{plan_import, validate_import, ImportPreview, ValidationResult};
