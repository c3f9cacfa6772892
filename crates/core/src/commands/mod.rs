//! Command registry and dispatch system
//!
//! Commands are registered as "category.action" (e.g., "prompts.list",
//! "data.import") and dispatched to handler functions that operate on a
//! [`VaultStore`].
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(store: &mut VaultStore, args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::{
    errors::{Result, VaultError},
    store::VaultStore,
};

pub mod categories;
pub mod data;
pub mod prompts;
pub mod user;

/// Type alias for command handler functions
///
/// All command handlers take the store and JSON arguments and return JSON
pub type CommandHandler = fn(&mut VaultStore, Value) -> Result<Value>;

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Test command
    map.insert("ping", ping as CommandHandler);

    // Prompts
    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.create", prompts::create as CommandHandler);
    map.insert("prompts.update", prompts::update as CommandHandler);
    map.insert("prompts.delete", prompts::delete as CommandHandler);
    map.insert("prompts.use", prompts::use_prompt as CommandHandler);
    map.insert("prompts.favorite", prompts::favorite as CommandHandler);
    map.insert("prompts.search", prompts::search as CommandHandler);
    map.insert("prompts.top", prompts::top as CommandHandler);

    // Categories
    map.insert("categories.list", categories::list as CommandHandler);
    map.insert("categories.create", categories::create as CommandHandler);
    map.insert("categories.delete", categories::delete as CommandHandler);
    map.insert("categories.usage", categories::usage as CommandHandler);

    // Local identity
    map.insert("user.get", user::get as CommandHandler);
    map.insert("user.set", user::set as CommandHandler);

    // Import / export
    map.insert("data.export", data::export as CommandHandler);
    map.insert("data.preview_import", data::preview_import as CommandHandler);
    map.insert("data.import", data::import as CommandHandler);
    map.insert("data.reset", data::reset as CommandHandler);

    map
});

/// Dispatch a command by name
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(store: &mut VaultStore, command: &str, args: Value) -> Result<Value> {
    match REGISTRY.get(command) {
        Some(handler) => handler(store, args),
        None => Err(VaultError::CommandNotFound(command.to_string())),
    }
}

/// Dispatch and fold errors into a structured error object
///
/// Error objects have fields:
/// - `error`: true (marker that this is an error response)
/// - `message`: user-friendly error message
/// - `category`: error category for logging/handling
pub fn call(store: &mut VaultStore, command: &str, args: Value) -> Value {
    match dispatch(store, command, args) {
        Ok(result) => result,
        Err(err) => {
            tracing::debug!(command, category = err.category(), %err, "command failed");
            error_object(&err)
        },
    }
}

pub fn error_object(err: &VaultError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
    })
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}

// ============================================================================
// Argument helpers
// ============================================================================

pub(crate) fn required_str<'a>(args: &'a Value, field: &str, command: &str) -> Result<&'a str> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| VaultError::InvalidArgs {
            command: command.to_string(),
            reason:  format!("missing string field '{}'", field),
        })
}

pub(crate) fn optional_str<'a>(args: &'a Value, field: &str) -> Option<&'a str> {
    args.get(field).and_then(Value::as_str)
}

/// Deserialize the whole argument object into `T`
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(args: Value, command: &str) -> Result<T> {
    serde_json::from_value(args).map_err(|e| VaultError::InvalidArgs {
        command: command.to_string(),
        reason:  e.to_string(),
    })
}

// ============================================================================
// Test Commands
// ============================================================================

/// Ping command - simple test to verify command dispatch works
///
/// Returns the input arguments with an added "pong" field.
fn ping(_store: &mut VaultStore, args: Value) -> Result<Value> {
    let mut result = match args {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    result.insert("pong".to_string(), Value::Bool(true));
    Ok(Value::Object(result))
}
