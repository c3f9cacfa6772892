use serde_json::{json, Value};

use super::required_str;
use crate::{errors::Result, store::VaultStore};

pub fn get(store: &mut VaultStore, _args: Value) -> Result<Value> {
    Ok(json!(store.user()))
}

pub fn set(store: &mut VaultStore, args: Value) -> Result<Value> {
    let name = required_str(&args, "name", "user.set")?;
    let user = store.set_user_name(name)?;
    Ok(json!(user))
}
