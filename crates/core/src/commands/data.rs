//! Import, export and reset commands
//!
//! Import arguments carry the document either parsed (`payload`) or as raw
//! text (`json`). Unparsable text is reported through the validation result,
//! not as a command error, so callers always get a preview to show.

use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    errors::{Result, VaultError},
    export::backup_file_name,
    store::VaultStore,
    validation::ImportPreview,
};

pub fn export(store: &mut VaultStore, _args: Value) -> Result<Value> {
    let document = store.export();
    Ok(json!({
        "fileName": backup_file_name(Utc::now()),
        "document": document.to_value()?,
    }))
}

pub fn preview_import(store: &mut VaultStore, args: Value) -> Result<Value> {
    let preview = preview_from_args(store, args, "data.preview_import")?;
    Ok(json!(preview))
}

/// Preview and commit in one step; returns the preview and the outcome
pub fn import(store: &mut VaultStore, args: Value) -> Result<Value> {
    let preview = preview_from_args(store, args, "data.import")?;
    let outcome = store.apply_import(&preview)?;

    Ok(json!({
        "validation": preview.validation,
        "categories": preview.categories,
        "outcome": outcome,
        "message": outcome.message(),
    }))
}

pub fn reset(store: &mut VaultStore, _args: Value) -> Result<Value> {
    store.reset_to_seed()?;
    Ok(json!({ "success": true }))
}

fn preview_from_args(store: &VaultStore, args: Value, command: &str) -> Result<ImportPreview> {
    let payload = match (args.get("payload"), args.get("json").and_then(Value::as_str)) {
        (Some(payload), _) => payload.clone(),
        // Non-JSON text becomes a non-object payload and fails validation
        (None, Some(text)) => serde_json::from_str(text).unwrap_or(Value::Null),
        (None, None) => {
            return Err(VaultError::InvalidArgs {
                command: command.to_string(),
                reason:  "expected 'payload' object or 'json' string".to_string(),
            })
        },
    };
    Ok(store.preview_import(&payload))
}
