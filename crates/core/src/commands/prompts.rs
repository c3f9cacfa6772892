use serde_json::{json, Value};

use super::{optional_str, parse_args, required_str};
use crate::{
    errors::Result,
    ids::RandomIds,
    models::{NewPrompt, PromptPatch},
    query::{search_prompts, top_prompts, CategoryFilter, DEFAULT_TOP_LIMIT},
    store::VaultStore,
};

pub fn list(store: &mut VaultStore, _args: Value) -> Result<Value> {
    Ok(json!({ "prompts": store.prompts() }))
}

/// Create from `{title, content, categoryId, description?, tags?, isFavorite?, author?}`
///
/// `author` defaults to the local user's name.
pub fn create(store: &mut VaultStore, mut args: Value) -> Result<Value> {
    if let Value::Object(map) = &mut args {
        map.entry("author")
            .or_insert_with(|| Value::String(store.user().name.clone()));
    }
    let new: NewPrompt = parse_args(args, "prompts.create")?;

    let prompt = store.add_prompt(new, &mut RandomIds)?;
    Ok(json!(prompt))
}

/// Update from `{id, ...fields}`; unknown fields are ignored
pub fn update(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "prompts.update")?.to_string();
    let patch: PromptPatch = parse_args(args, "prompts.update")?;

    let prompt = store.update_prompt(&id, &patch)?;
    Ok(json!(prompt))
}

pub fn delete(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "prompts.delete")?;
    let removed = store.remove_prompt(id)?;

    Ok(json!({ "success": true, "removed": removed }))
}

pub fn use_prompt(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "prompts.use")?;
    let view_count = store.increment_view_count(id)?;

    Ok(json!({ "success": true, "viewCount": view_count }))
}

pub fn favorite(store: &mut VaultStore, args: Value) -> Result<Value> {
    let id = required_str(&args, "id", "prompts.favorite")?;
    let is_favorite = store.toggle_favorite(id)?;

    Ok(json!({ "success": true, "isFavorite": is_favorite }))
}

/// Search `{term?, categoryId?}`; a missing category or "ALL" means every category
pub fn search(store: &mut VaultStore, args: Value) -> Result<Value> {
    let term = optional_str(&args, "term").unwrap_or_default();
    let filter = CategoryFilter::from_arg(optional_str(&args, "categoryId"));

    Ok(json!({ "prompts": search_prompts(store.prompts(), term, &filter) }))
}

pub fn top(store: &mut VaultStore, args: Value) -> Result<Value> {
    let filter = CategoryFilter::from_arg(optional_str(&args, "categoryId"));
    let limit = args
        .get("limit")
        .and_then(Value::as_u64)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_TOP_LIMIT);

    Ok(json!({ "prompts": top_prompts(store.prompts(), &filter, limit) }))
}
