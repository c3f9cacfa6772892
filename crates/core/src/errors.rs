//! Error types for prompt-vault
//!
//! Import problems are never errors: they are reported as data inside
//! `ValidationResult`. This enum covers storage, arguments and conflicts.

use thiserror::Error;

/// Result type alias for prompt-vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Main error type for prompt-vault
#[derive(Debug, Error)]
pub enum VaultError {
    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No record with the given id in the named collection
    #[error("{collection} not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// Category still referenced by prompts
    #[error("Category '{id}' is used by {usage} prompts")]
    CategoryInUse { id: String, usage: usize },

    /// Id generator kept producing ids that already exist
    #[error("Could not generate a unique id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

impl VaultError {
    /// Get user-friendly error message for display
    pub fn user_message(&self) -> String {
        match self {
            VaultError::CommandNotFound(cmd) => {
                format!(
                    "Command '{}' not found. Run `prompt-vault commands` for available commands.",
                    cmd
                )
            },
            VaultError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            VaultError::CategoryInUse { usage, .. } => {
                format!("Cannot delete category. It is used by {} prompts.", usage)
            },
            VaultError::DatabaseError(err) => {
                format!("Database error: {}", err)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            VaultError::CommandNotFound(_) => "command",
            VaultError::InvalidArgs { .. } => "arguments",
            VaultError::SerdeError(_) => "serialization",
            VaultError::DatabaseError(_) => "database",
            VaultError::IoError(_) => "io",
            VaultError::ConfigError(_) => "config",
            VaultError::ValidationError(_) => "validation",
            VaultError::NotFound { .. } => "not_found",
            VaultError::CategoryInUse { .. } => "conflict",
            VaultError::IdExhausted { .. } => "id_generation",
        }
    }
}
