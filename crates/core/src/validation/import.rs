//! Import validation engine
//!
//! Classifies every record of an untrusted import payload against the
//! current collections. Nothing here touches storage: callers pass
//! snapshots in and get a [`ValidationResult`] back.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::schema::{parse_category, parse_prompt};
use crate::{
    export::APP_IDENTIFIER,
    merge::novel_records,
    models::{Category, Prompt},
};

/// Longest accepted title, in characters
///
/// Counted in Unicode scalar values (`chars()`), not UTF-16 code units, so a
/// title of astral-plane characters such as emoji may hold up to 200 of them.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Classification of one import attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff there are no top-level errors and at least one valid prompt
    pub is_valid:        bool,
    pub valid_prompts:   Vec<Prompt>,
    pub invalid_prompts: Vec<InvalidPrompt>,
    /// Top-level structural problems
    pub errors:          Vec<String>,
    pub warnings:        Vec<String>,
}

/// A rejected record, kept verbatim next to its reasons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidPrompt {
    pub prompt: Value,
    pub errors: Vec<String>,
}

/// Categories to add plus the prompt classification that assumed them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub validation: ValidationResult,
    pub categories: Vec<Category>,
}

/// Validate an import payload
///
/// `imported_categories` are treated as present for reference checks, so a
/// bundle may point at categories it defines itself. Never panics on
/// malformed input.
pub fn validate_import(
    payload: &Value,
    existing_prompts: &[Prompt],
    existing_categories: &[Category],
    imported_categories: &[Category],
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let Some(document) = payload.as_object() else {
        result.errors.push("Invalid JSON structure".to_string());
        return result;
    };

    if let Some(app) = document.get("app") {
        if app.as_str() != Some(APP_IDENTIFIER) {
            result.errors.push(format!(
                "Invalid app identifier. Expected \"{}\"",
                APP_IDENTIFIER
            ));
        }
    }

    let Some(records) = document.get("prompts").and_then(Value::as_array) else {
        result.errors.push("Prompts must be an array".to_string());
        return result;
    };

    let category_ids: HashSet<&str> = existing_categories
        .iter()
        .chain(imported_categories)
        .map(|c| c.id.as_str())
        .collect();
    let existing_ids: HashSet<&str> = existing_prompts.iter().map(|p| p.id.as_str()).collect();

    for (index, record) in records.iter().enumerate() {
        let prompt = match parse_prompt(record) {
            Ok(prompt) => prompt,
            Err(reason) => {
                debug!(index, %reason, "import record rejected");
                result.invalid_prompts.push(InvalidPrompt {
                    prompt: record.clone(),
                    errors: vec!["Invalid prompt structure".to_string()],
                });
                continue;
            },
        };

        let mut errors = Vec::new();

        if prompt.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }
        if prompt.content.trim().is_empty() {
            errors.push("Content cannot be empty".to_string());
        }
        if prompt.title.chars().count() > MAX_TITLE_LENGTH {
            errors.push(format!(
                "Title too long (max {} characters)",
                MAX_TITLE_LENGTH
            ));
        }
        if !category_ids.contains(prompt.category_id.as_str()) {
            errors.push(format!(
                "Category \"{}\" does not exist",
                prompt.category_id
            ));
            result.warnings.push(format!(
                "Prompt \"{}\" references unknown category. Will be skipped.",
                prompt.title
            ));
        }

        // Duplicates stay valid; the merge turns them into no-ops.
        if existing_ids.contains(prompt.id.as_str()) {
            result.warnings.push(format!(
                "Prompt \"{}\" (ID: {}) already exists - will be skipped",
                prompt.title, prompt.id
            ));
        }

        if errors.is_empty() {
            result.valid_prompts.push(prompt);
        } else {
            debug!(index, id = %prompt.id, ?errors, "import record invalid");
            result.invalid_prompts.push(InvalidPrompt {
                prompt: record.clone(),
                errors,
            });
        }
    }

    result.is_valid = result.errors.is_empty() && !result.valid_prompts.is_empty();
    debug!(
        valid = result.valid_prompts.len(),
        invalid = result.invalid_prompts.len(),
        warnings = result.warnings.len(),
        errors = result.errors.len(),
        "import payload validated"
    );
    result
}

/// Scan the bundle's own categories, then validate prompts against them
///
/// Only categories whose ids are new relative to `existing_categories` are
/// proposed. Malformed category entries are skipped with a warning.
pub fn plan_import(
    payload: &Value,
    existing_prompts: &[Prompt],
    existing_categories: &[Category],
) -> ImportPreview {
    let mut bundled = Vec::new();
    let mut category_warnings = Vec::new();

    if let Some(entries) = payload.get("categories").and_then(Value::as_array) {
        for (index, entry) in entries.iter().enumerate() {
            match parse_category(entry) {
                Ok(category) => bundled.push(category),
                Err(reason) => {
                    debug!(index, %reason, "import category rejected");
                    category_warnings.push(format!(
                        "Category #{} has an invalid structure and will be skipped",
                        index + 1
                    ));
                },
            }
        }
    }

    let categories = novel_records(existing_categories, &bundled);
    let mut validation = validate_import(payload, existing_prompts, existing_categories, &categories);
    validation.warnings.extend(category_warnings);

    ImportPreview {
        validation,
        categories,
    }
}
