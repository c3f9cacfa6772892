//! Import validation
//!
//! - `schema`: structural parsing of a single untyped record
//! - `import`: whole-payload classification and the two-phase import plan

pub mod import;
pub mod schema;

pub use import::{plan_import, validate_import, ImportPreview, InvalidPrompt, ValidationResult, MAX_TITLE_LENGTH};
pub use schema::{is_valid_record, parse_category, parse_prompt, RecordError};
