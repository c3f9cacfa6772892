//! Export document
//!
//! Snapshot of both collections plus the compatibility token the importer
//! checks on the way back in.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    models::{Category, Prompt},
};

/// Literal written to and expected in the `app` field
pub const APP_IDENTIFIER: &str = "PromptVault";

/// Prefix of backup file names
pub const BACKUP_FILE_PREFIX: &str = "promptvault";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub prompts:     Vec<Prompt>,
    pub categories:  Vec<Category>,
    /// ISO-8601, millisecond precision, UTC
    pub exported_at: String,
    pub app:         String,
}

impl ExportDocument {
    /// Snapshot the collections as of now
    pub fn new(prompts: &[Prompt], categories: &[Category]) -> Self {
        Self::at(prompts, categories, Utc::now())
    }

    pub fn at(prompts: &[Prompt], categories: &[Category], exported_at: DateTime<Utc>) -> Self {
        Self {
            prompts:     prompts.to_vec(),
            categories:  categories.to_vec(),
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            app:         APP_IDENTIFIER.to_string(),
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `promptvault-backup-YYYY-MM-DD.json`
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!("{}-backup-{}.json", BACKUP_FILE_PREFIX, at.format("%Y-%m-%d"))
}
