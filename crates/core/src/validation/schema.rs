//! Structural parsing of untyped import records
//!
//! Checks run in a fixed order and stop at the first failure. A failure is a
//! `RecordError`, never a panic: callers decide how to report it.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Category, Prompt};

/// Why a record failed structural parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    /// Required string missing, empty or not a string
    #[error("field '{0}' must be a non-empty string")]
    MissingString(&'static str),

    #[error("field '{field}' must be {expected}")]
    WrongType {
        field:    &'static str,
        expected: &'static str,
    },
}

/// Parse a candidate into a `Prompt`
pub fn parse_prompt(candidate: &Value) -> Result<Prompt, RecordError> {
    let record = candidate.as_object().ok_or(RecordError::NotAnObject)?;

    let id = required_string(record, "id")?;
    let title = required_string(record, "title")?;
    let content = required_string(record, "content")?;
    let category_id = required_string(record, "categoryId")?;

    let description = match record.get("description") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(RecordError::WrongType {
                field:    "description",
                expected: "a string",
            })
        },
    };

    let tags = record
        .get("tags")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|tag| tag.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or(RecordError::WrongType {
            field:    "tags",
            expected: "an array of strings",
        })?;

    let view_count = record
        .get("viewCount")
        .and_then(whole_count)
        .ok_or(RecordError::WrongType {
            field:    "viewCount",
            expected: "a non-negative integer",
        })?;

    let created_at = record
        .get("createdAt")
        .and_then(whole_number)
        .ok_or(RecordError::WrongType {
            field:    "createdAt",
            expected: "an integer timestamp",
        })?;

    let is_favorite = record
        .get("isFavorite")
        .and_then(Value::as_bool)
        .ok_or(RecordError::WrongType {
            field:    "isFavorite",
            expected: "a boolean",
        })?;

    let author = record
        .get("author")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or(RecordError::WrongType {
            field:    "author",
            expected: "a string",
        })?;

    Ok(Prompt {
        id,
        title,
        content,
        description,
        category_id,
        tags,
        view_count,
        author,
        created_at,
        is_favorite,
    })
}

/// Predicate form of [`parse_prompt`]
pub fn is_valid_record(candidate: &Value) -> bool {
    parse_prompt(candidate).is_ok()
}

/// Parse a candidate into a `Category`
///
/// Only `id` must be non-empty; `name` and `color` just have to be strings.
pub fn parse_category(candidate: &Value) -> Result<Category, RecordError> {
    let record = candidate.as_object().ok_or(RecordError::NotAnObject)?;

    let id = required_string(record, "id")?;
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .ok_or(RecordError::WrongType {
            field:    "name",
            expected: "a string",
        })?;
    let color = record
        .get("color")
        .and_then(Value::as_str)
        .ok_or(RecordError::WrongType {
            field:    "color",
            expected: "a string",
        })?;

    Ok(Category {
        id,
        name: name.to_string(),
        color: color.to_string(),
    })
}

fn required_string(record: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match record.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(RecordError::MissingString(field)),
    }
}

/// Integer value of a JSON number, accepting floats with no fractional part
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Non-negative integer value of a JSON number over the full `u64` range
fn whole_count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // 2^64 itself is representable as f64 but out of range
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_record() -> Value {
        json!({
            "id": "p1",
            "title": "T",
            "content": "C",
            "categoryId": "cat_1",
            "tags": [],
            "viewCount": 0,
            "author": "A",
            "createdAt": 1000,
            "isFavorite": false
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut record = valid_record();
        record[field] = value;
        record
    }

    fn without(field: &str) -> Value {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove(field);
        record
    }

    #[test]
    fn test_parses_minimal_record() {
        let prompt = parse_prompt(&valid_record()).unwrap();
        assert_eq!(prompt.id, "p1");
        assert_eq!(prompt.category_id, "cat_1");
        assert_eq!(prompt.description, None);
        assert!(prompt.tags.is_empty());
        assert!(is_valid_record(&valid_record()));
    }

    #[test]
    fn test_keeps_tag_order_and_duplicates() {
        let prompt = parse_prompt(&with("tags", json!(["b", "a", "b"]))).unwrap();
        assert_eq!(prompt.tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(parse_prompt(&json!("oops")), Err(RecordError::NotAnObject));
        assert_eq!(parse_prompt(&json!(null)), Err(RecordError::NotAnObject));
        assert!(!is_valid_record(&json!([1, 2])));
    }

    #[test]
    fn test_required_strings() {
        assert_eq!(
            parse_prompt(&without("id")),
            Err(RecordError::MissingString("id"))
        );
        assert_eq!(
            parse_prompt(&with("title", json!(""))),
            Err(RecordError::MissingString("title"))
        );
        assert_eq!(
            parse_prompt(&with("categoryId", json!(7))),
            Err(RecordError::MissingString("categoryId"))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let mut record = without("content");
        record["isFavorite"] = json!("yes");
        assert_eq!(
            parse_prompt(&record),
            Err(RecordError::MissingString("content"))
        );
    }

    #[test]
    fn test_description_must_be_string_when_present() {
        assert!(parse_prompt(&with("description", json!("d"))).is_ok());
        assert!(parse_prompt(&with("description", json!(null))).is_err());
        assert!(parse_prompt(&with("description", json!(3))).is_err());
    }

    #[test]
    fn test_tags_must_be_string_array() {
        assert!(parse_prompt(&with("tags", json!("a,b"))).is_err());
        assert!(parse_prompt(&with("tags", json!(["a", 1]))).is_err());
        assert!(parse_prompt(&without("tags")).is_err());
    }

    #[test]
    fn test_view_count_must_be_non_negative_integer() {
        assert!(parse_prompt(&with("viewCount", json!(-1))).is_err());
        assert!(parse_prompt(&with("viewCount", json!(1.5))).is_err());
        assert!(parse_prompt(&with("viewCount", json!("3"))).is_err());
        assert_eq!(
            parse_prompt(&with("viewCount", json!(12.0))).unwrap().view_count,
            12
        );
    }

    #[test]
    fn test_view_count_full_range() {
        for count in [0, i64::MAX as u64, i64::MAX as u64 + 1, u64::MAX] {
            let prompt = parse_prompt(&with("viewCount", json!(count))).unwrap();
            assert_eq!(prompt.view_count, count);

            let reparsed = parse_prompt(&serde_json::to_value(&prompt).unwrap()).unwrap();
            assert_eq!(reparsed, prompt);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RecordError::NotAnObject.to_string(), "record is not an object");
        assert_eq!(
            RecordError::WrongType {
                field:    "tags",
                expected: "an array of strings",
            }
            .to_string(),
            "field 'tags' must be an array of strings"
        );
    }

    #[test]
    fn test_remaining_field_types() {
        assert!(parse_prompt(&with("createdAt", json!("yesterday"))).is_err());
        assert!(parse_prompt(&with("isFavorite", json!(0))).is_err());
        assert!(parse_prompt(&with("author", json!(null))).is_err());
        // Empty author is allowed
        assert!(parse_prompt(&with("author", json!(""))).is_ok());
    }

    #[test]
    fn test_parse_category() {
        let category = parse_category(&json!({"id": "c", "name": "N", "color": "#fff"})).unwrap();
        assert_eq!(category.id, "c");
        assert!(parse_category(&json!({"id": "", "name": "N", "color": "#fff"})).is_err());
        assert!(parse_category(&json!({"id": "c", "name": "N"})).is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RecordError::MissingString("id").to_string(),
            "field 'id' must be a non-empty string"
        );
    }
}
