use serde_json::{json, Value};

use super::{parse_args, required_str};
use crate::{errors::Result, ids::RandomIds, models::NewCategory, store::VaultStore};

/// Categories with their usage counts
pub fn list(store: &mut VaultStore, _args: Value) -> Result<Value> {
    let categories: Vec<Value> = store
        .categories()
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "color": c.color,
                "usageCount": store.usage_count(&c.id),
            })
        })
        .collect();
    Ok(json!({ "categories": categories }))
}

pub fn create(store: &mut VaultStore, args: Value) -> Result<Value> {
    let new: NewCategory = parse_args(args, "categories.create")?;
    let category = store.add_category(new, &mut RandomIds)?;
    Ok(json!(category))
}

/// Fails with a `conflict` error while prompts still use the category
pub fn delete(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "categories.delete")?;
    let removed = store.remove_category(id)?;
    Ok(json!({ "success": true, "removed": removed }))
}

pub fn usage(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "categories.usage")?;
    Ok(json!({ "id": id, "usageCount": store.usage_count(id) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{call, dispatch};

    #[test]
    fn test_list_includes_usage() {
        let mut store = VaultStore::open_in_memory().unwrap();
        let listed = dispatch(&mut store, "categories.list", json!({})).unwrap();
        assert_eq!(listed["categories"][0]["id"], json!("cat_1"));
        assert_eq!(listed["categories"][0]["usageCount"], json!(1));
        assert_eq!(listed["categories"][3]["usageCount"], json!(0));
    }

    #[test]
    fn test_delete_in_use_is_conflict() {
        let mut store = VaultStore::open_in_memory().unwrap();
        let value = call(&mut store, "categories.delete", json!({ "id": "cat_2" }));

        assert_eq!(value["error"], json!(true));
        assert_eq!(value["category"], json!("conflict"));
        assert_eq!(store.categories().len(), 4);
    }

    #[test]
    fn test_create_then_delete() {
        let mut store = VaultStore::open_in_memory().unwrap();
        let created = dispatch(
            &mut store,
            "categories.create",
            json!({ "name": "Research", "color": "#ef4444" }),
        )
        .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let usage = dispatch(&mut store, "categories.usage", json!({ "id": id })).unwrap();
        assert_eq!(usage["usageCount"], json!(0));

        let deleted = dispatch(&mut store, "categories.delete", json!({ "id": id })).unwrap();
        assert_eq!(deleted["removed"], json!(true));
    }
}
