//! Id-keyed "skip existing" merge of record collections
//!
//! Existing records always win: an incoming record whose id is already
//! present is dropped, never field-merged. Repeated ids inside the incoming
//! batch are dropped after their first occurrence. Inputs are never mutated.

use std::collections::HashSet;

use crate::models::{Category, Prompt};

/// A record addressed by a string id
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Prompt {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Incoming records whose ids are not taken by `existing`, in input order
pub fn novel_records<T: Keyed + Clone>(existing: &[T], incoming: &[T]) -> Vec<T> {
    let mut seen: HashSet<&str> = existing.iter().map(Keyed::key).collect();
    incoming
        .iter()
        .filter(|record| seen.insert(record.key()))
        .cloned()
        .collect()
}

/// `existing` followed by the novel part of `incoming`
pub fn merge_by_id<T: Keyed + Clone>(existing: &[T], incoming: &[T]) -> Vec<T> {
    let mut merged = existing.to_vec();
    merged.extend(novel_records(existing, incoming));
    merged
}

pub fn merge_categories(existing: &[Category], incoming: &[Category]) -> Vec<Category> {
    merge_by_id(existing, incoming)
}

/// Imported prompts are appended; only manual creation is recency-ordered.
pub fn merge_prompts(existing: &[Prompt], incoming: &[Prompt]) -> Vec<Prompt> {
    merge_by_id(existing, incoming)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id:    id.to_string(),
            name:  name.to_string(),
            color: "#000000".to_string(),
        }
    }

    fn prompt(id: &str) -> Prompt {
        Prompt {
            id:          id.to_string(),
            title:       format!("Title {}", id),
            content:     "content".to_string(),
            description: None,
            category_id: "cat_1".to_string(),
            tags:        vec![],
            view_count:  0,
            author:      "A".to_string(),
            created_at:  0,
            is_favorite: false,
        }
    }

    fn ids<T: Keyed>(records: &[T]) -> Vec<&str> {
        records.iter().map(Keyed::key).collect()
    }

    #[test]
    fn test_existing_first_then_novel_in_order() {
        let existing = vec![category("a", "A"), category("b", "B")];
        let incoming = vec![category("d", "D"), category("b", "other"), category("c", "C")];

        let merged = merge_categories(&existing, &incoming);
        assert_eq!(ids(&merged), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_existing_record_wins_on_collision() {
        let existing = vec![category("a", "Original")];
        let incoming = vec![category("a", "Replacement")];

        let merged = merge_categories(&existing, &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Original");
    }

    #[test]
    fn test_repeated_incoming_id_kept_once() {
        let merged = merge_prompts(&[], &[prompt("x"), prompt("x"), prompt("y")]);
        assert_eq!(ids(&merged), vec!["x", "y"]);
    }

    #[test]
    fn test_prompts_are_appended() {
        let merged = merge_prompts(&[prompt("old")], &[prompt("new")]);
        assert_eq!(ids(&merged), vec!["old", "new"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let existing = vec![prompt("a")];
        let incoming = vec![prompt("b")];
        let _ = merge_prompts(&existing, &incoming);
        assert_eq!(ids(&existing), vec!["a"]);
        assert_eq!(ids(&incoming), vec!["b"]);
    }

    #[test]
    fn test_novel_records_against_empty() {
        let novel = novel_records(&[], &[category("a", "A")]);
        assert_eq!(ids(&novel), vec!["a"]);
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(
            existing in proptest::collection::vec("[a-e]", 0..6),
            incoming in proptest::collection::vec("[a-h]", 0..8),
        ) {
            let mut seen = HashSet::new();
            let existing: Vec<Prompt> = existing
                .iter()
                .filter(|id| seen.insert(id.to_string()))
                .map(|id| prompt(id))
                .collect();
            let incoming: Vec<Prompt> = incoming.iter().map(|id| prompt(id)).collect();

            let once = merge_prompts(&existing, &incoming);
            let twice = merge_prompts(&once, &incoming);
            prop_assert_eq!(&once, &twice);

            let unique: HashSet<&str> = once.iter().map(Keyed::key).collect();
            prop_assert_eq!(unique.len(), once.len());
        }

        #[test]
        fn prop_merge_preserves_ids_and_prefix(
            existing in proptest::collection::vec("[a-e]", 0..6),
            incoming in proptest::collection::vec("[a-h]", 0..8),
        ) {
            let mut seen = HashSet::new();
            let existing: Vec<Category> = existing
                .iter()
                .filter(|id| seen.insert(id.to_string()))
                .map(|id| category(id, "existing"))
                .collect();
            let incoming: Vec<Category> = incoming.iter().map(|id| category(id, "incoming")).collect();

            let merged = merge_categories(&existing, &incoming);
            prop_assert_eq!(&merged[..existing.len()], &existing[..]);
            for record in &merged[existing.len()..] {
                prop_assert!(incoming.iter().any(|c| c.id == record.id));
                prop_assert_eq!(record.name.as_str(), "incoming");
            }
        }
    }
}
