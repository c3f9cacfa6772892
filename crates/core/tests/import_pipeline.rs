//! End-to-end tests for the export, validate and merge pipeline
//!
//! These tests verify:
//! - An exported document re-validates cleanly against an empty vault
//! - Importing twice changes nothing the second time
//! - Bundled categories satisfy references from the same bundle
//! - Category deletion is refused while prompts still use it

use prompt_vault_core::{
    commands,
    export::ExportDocument,
    ids::RandomIds,
    merge::merge_prompts,
    validate_import, Category, NewPrompt, Prompt, VaultError, VaultStore,
};
use serde_json::{json, Value};
use tempfile::tempdir;

fn prompt(id: &str, category_id: &str) -> Prompt {
    Prompt {
        id:          id.to_string(),
        title:       format!("Prompt {}", id),
        content:     "Body".to_string(),
        description: Some("desc".to_string()),
        category_id: category_id.to_string(),
        tags:        vec!["one".to_string(), "two".to_string()],
        view_count:  7,
        author:      "Tester".to_string(),
        created_at:  1_700_000_000_000,
        is_favorite: true,
    }
}

fn category(id: &str) -> Category {
    Category {
        id:    id.to_string(),
        name:  format!("Category {}", id),
        color: "#3b82f6".to_string(),
    }
}

#[test]
fn test_export_revalidates_against_empty_vault() {
    let categories = vec![category("c1"), category("c2")];
    let prompts = vec![prompt("a", "c1"), prompt("b", "c2"), prompt("c", "c1")];

    let document = ExportDocument::new(&prompts, &categories);
    let payload: Value = serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();

    let result = validate_import(&payload, &[], &categories, &[]);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.invalid_prompts.is_empty());
    assert_eq!(result.valid_prompts, prompts);
}

#[test]
fn test_second_import_is_a_no_op() {
    let mut store = VaultStore::open_in_memory().unwrap();
    let payload = json!({
        "app": "PromptVault",
        "prompts": [prompt("a", "c9"), prompt("b", "cat_1")],
        "categories": [category("c9")]
    });

    let preview = store.preview_import(&payload);
    let first = store.apply_import(&preview).unwrap();
    assert_eq!(first.prompts_imported, 2);
    assert_eq!(first.categories_imported, 1);
    let prompts_after = store.prompts().to_vec();
    let categories_after = store.categories().to_vec();

    let preview = store.preview_import(&payload);
    assert_eq!(preview.validation.warnings.len(), 2);
    let second = store.apply_import(&preview).unwrap();

    assert_eq!(second.prompts_imported, 0);
    assert_eq!(second.prompts_skipped, 2);
    assert_eq!(second.categories_imported, 0);
    assert_eq!(store.prompts(), prompts_after.as_slice());
    assert_eq!(store.categories(), categories_after.as_slice());
}

#[test]
fn test_merge_preserves_existing_prefix() {
    let existing = vec![prompt("a", "c1"), prompt("b", "c1")];
    let mut changed = prompt("a", "c2");
    changed.title = "Other".to_string();
    let incoming = vec![changed, prompt("z", "c1")];

    let merged = merge_prompts(&existing, &incoming);

    assert_eq!(&merged[..2], existing.as_slice());
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[2].id, "z");
}

#[test]
fn test_dangling_reference_is_not_imported() {
    let mut store = VaultStore::open_in_memory().unwrap();
    let payload = json!({ "prompts": [prompt("lost", "nowhere"), prompt("kept", "cat_2")] });

    let preview = store.preview_import(&payload);
    assert!(preview.validation.is_valid);
    assert_eq!(preview.validation.invalid_prompts.len(), 1);
    assert_eq!(
        preview.validation.invalid_prompts[0].errors,
        vec!["Category \"nowhere\" does not exist".to_string()]
    );

    let outcome = store.apply_import(&preview).unwrap();
    assert_eq!(outcome.prompts_imported, 1);
    assert_eq!(outcome.prompts_invalid, 1);
    assert!(store.prompt("lost").is_none());
    assert!(store
        .prompts()
        .iter()
        .all(|p| store.categories().iter().any(|c| c.id == p.category_id)));
}

#[test]
fn test_category_guard_through_commands() {
    let mut store = VaultStore::open_in_memory().unwrap();

    let refused = commands::call(&mut store, "categories.delete", json!({ "id": "cat_1" }));
    assert_eq!(refused["error"], json!(true));
    assert_eq!(refused["category"], json!("conflict"));

    commands::call(&mut store, "prompts.delete", json!({ "id": "p_1" }));
    let deleted = commands::call(&mut store, "categories.delete", json!({ "id": "cat_1" }));
    assert_eq!(deleted["removed"], json!(true));
}

#[test]
fn test_export_then_import_into_second_vault() {
    let dir = tempdir().unwrap();
    let mut source = VaultStore::open_in_memory().unwrap();
    let created = source
        .add_prompt(
            NewPrompt {
                title:       "Shared".to_string(),
                content:     "Portable content".to_string(),
                description: None,
                category_id: "cat_3".to_string(),
                tags:        vec![],
                author:      "Ada".to_string(),
                is_favorite: false,
            },
            &mut RandomIds,
        )
        .unwrap();

    let path = dir.path().join("backup.json");
    std::fs::write(&path, source.export().to_json_pretty().unwrap()).unwrap();

    let mut target = VaultStore::open_in_memory().unwrap();
    let payload: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let preview = target.preview_import(&payload);
    let outcome = target.apply_import(&preview).unwrap();

    assert_eq!(outcome.prompts_imported, 1);
    assert_eq!(outcome.prompts_skipped, 3);
    assert_eq!(target.prompt(&created.id), Some(&created));
}

#[test]
fn test_store_errors_surface_as_vault_errors() {
    let mut store = VaultStore::open_in_memory().unwrap();
    match store.remove_category("cat_2") {
        Err(VaultError::CategoryInUse { usage, .. }) => assert_eq!(usage, 1),
        other => panic!("Expected CategoryInUse, got {:?}", other),
    }
}
