//! Persisted collection store
//!
//! Owns the prompt, category and user records and their durable copies.
//! Validation, merge and export are pure functions over the snapshots this
//! store hands out; every write goes through the methods below.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::VaultConfig,
    db::Db,
    errors::{Result, VaultError},
    export::ExportDocument,
    ids::IdGenerator,
    merge::{merge_categories, merge_prompts},
    models::{Category, NewCategory, NewPrompt, Prompt, PromptPatch, User},
    validation::{plan_import, ImportPreview, MAX_TITLE_LENGTH},
};

mod collection;
pub mod seed;

use collection::Collection;
pub use collection::MAX_ID_ATTEMPTS;

pub const PROMPTS_KEY: &str = "promptvault-prompts";
pub const CATEGORIES_KEY: &str = "promptvault-categories";
pub const USER_KEY: &str = "promptvault-user";

/// What an applied import changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub prompts_imported:    usize,
    /// Valid prompts whose ids were already taken
    pub prompts_skipped:     usize,
    pub prompts_invalid:     usize,
    pub categories_imported: usize,
}

impl ImportOutcome {
    /// One-line summary, e.g. "Imported 2 prompts, skipped 1 duplicates."
    pub fn message(&self) -> String {
        let mut parts = Vec::new();
        if self.prompts_imported > 0 {
            let mut part = format!("Imported {} prompts", self.prompts_imported);
            if self.prompts_skipped > 0 {
                part.push_str(&format!(", skipped {} duplicates", self.prompts_skipped));
            }
            parts.push(part);
        }
        if self.prompts_invalid > 0 {
            parts.push(format!("{} invalid prompts ignored", self.prompts_invalid));
        }
        if self.categories_imported > 0 {
            parts.push(format!("{} categories imported", self.categories_imported));
        }

        if parts.is_empty() {
            "No data to import.".to_string()
        } else {
            format!("{}.", parts.join(". "))
        }
    }
}

pub struct VaultStore {
    db:         Db,
    prompts:    Collection<Prompt>,
    categories: Collection<Category>,
    user:       User,
}

impl VaultStore {
    /// Open the store at the configured data path
    pub fn open(config: &VaultConfig) -> Result<Self> {
        Self::with_db(Db::open(&config.data_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_db(Db::open_in_memory()?)
    }

    pub fn with_db(db: Db) -> Result<Self> {
        let prompts = Collection::load(&db, PROMPTS_KEY, seed::seed_prompts)?;
        let categories = Collection::load(&db, CATEGORIES_KEY, seed::seed_categories)?;
        let user = match db.load(USER_KEY)? {
            Some(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                warn!(key = USER_KEY, %err, "stored user unreadable, restoring defaults");
                seed::seed_user()
            }),
            None => seed::seed_user(),
        };

        Ok(Self {
            db,
            prompts,
            categories,
            user,
        })
    }

    // ========================================
    // Snapshots
    // ========================================

    pub fn prompts(&self) -> &[Prompt] {
        self.prompts.records()
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.records()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.prompts.get(id)
    }

    /// Number of prompts filed under `category_id`
    pub fn usage_count(&self, category_id: &str) -> usize {
        self.prompts()
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    // ========================================
    // Prompts
    // ========================================

    /// Create a prompt with a fresh id, zero views and the current time
    ///
    /// New prompts go to the front: manual creation is most-recent-first.
    pub fn add_prompt(&mut self, new: NewPrompt, ids: &mut impl IdGenerator) -> Result<Prompt> {
        self.check_prompt_fields(&new.title, &new.content, &new.category_id)?;

        let id = self.prompts.fresh_id(ids)?;
        let prompt = new.into_prompt(id, Utc::now().timestamp_millis());

        let mut records = Vec::with_capacity(self.prompts().len() + 1);
        records.push(prompt.clone());
        records.extend_from_slice(self.prompts());
        self.prompts.commit(&self.db, records)?;

        info!(id = %prompt.id, "prompt created");
        Ok(prompt)
    }

    /// Overlay `patch` on the prompt with `id`
    pub fn update_prompt(&mut self, id: &str, patch: &PromptPatch) -> Result<Prompt> {
        let mut updated = self.require_prompt(id)?.clone();
        patch.apply_to(&mut updated);
        self.check_prompt_fields(&updated.title, &updated.content, &updated.category_id)?;

        self.replace_prompt(updated.clone())?;
        info!(id, "prompt updated");
        Ok(updated)
    }

    /// Delete unconditionally; returns whether a prompt was removed
    pub fn remove_prompt(&mut self, id: &str) -> Result<bool> {
        if !self.prompts.contains(id) {
            return Ok(false);
        }
        let records = self
            .prompts()
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        self.prompts.commit(&self.db, records)?;
        info!(id, "prompt deleted");
        Ok(true)
    }

    /// Record one more view; returns the new count
    pub fn increment_view_count(&mut self, id: &str) -> Result<u64> {
        let mut prompt = self.require_prompt(id)?.clone();
        prompt.view_count = prompt.view_count.saturating_add(1);
        let count = prompt.view_count;
        self.replace_prompt(prompt)?;
        Ok(count)
    }

    /// Flip the favorite flag; returns the new value
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let mut prompt = self.require_prompt(id)?.clone();
        prompt.is_favorite = !prompt.is_favorite;
        let favorite = prompt.is_favorite;
        self.replace_prompt(prompt)?;
        Ok(favorite)
    }

    pub fn replace_prompts(&mut self, prompts: Vec<Prompt>) -> Result<()> {
        self.prompts.commit(&self.db, prompts)
    }

    /// Merge `incoming` behind the current prompts, skipping taken ids;
    /// returns how many were added
    pub fn append_prompts(&mut self, incoming: &[Prompt]) -> Result<usize> {
        let before = self.prompts().len();
        let merged = merge_prompts(self.prompts(), incoming);
        let added = merged.len() - before;
        if added > 0 {
            self.prompts.commit(&self.db, merged)?;
        }
        Ok(added)
    }

    pub fn reset_prompts(&mut self) -> Result<()> {
        self.prompts.commit(&self.db, seed::seed_prompts())
    }

    // ========================================
    // Categories
    // ========================================

    pub fn add_category(&mut self, new: NewCategory, ids: &mut impl IdGenerator) -> Result<Category> {
        if new.name.trim().is_empty() {
            return Err(VaultError::ValidationError(
                "Category name cannot be empty".to_string(),
            ));
        }

        let category = Category {
            id:    self.categories.fresh_id(ids)?,
            name:  new.name,
            color: new.color,
        };
        let mut records = self.categories().to_vec();
        records.push(category.clone());
        self.categories.commit(&self.db, records)?;

        info!(id = %category.id, "category created");
        Ok(category)
    }

    /// Delete a category nobody uses
    ///
    /// Fails with `CategoryInUse` while any prompt references it; returns
    /// `Ok(false)` when the id is unknown.
    pub fn remove_category(&mut self, id: &str) -> Result<bool> {
        let usage = self.usage_count(id);
        if usage > 0 {
            warn!(id, usage, "refusing to delete category in use");
            return Err(VaultError::CategoryInUse {
                id: id.to_string(),
                usage,
            });
        }
        if !self.categories.contains(id) {
            return Ok(false);
        }

        let records = self
            .categories()
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        self.categories.commit(&self.db, records)?;
        info!(id, "category deleted");
        Ok(true)
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        self.categories.commit(&self.db, categories)
    }

    /// Merge `incoming` behind the current categories, skipping taken ids;
    /// returns how many were added
    pub fn append_categories(&mut self, incoming: &[Category]) -> Result<usize> {
        let before = self.categories().len();
        let merged = merge_categories(self.categories(), incoming);
        let added = merged.len() - before;
        if added > 0 {
            self.categories.commit(&self.db, merged)?;
        }
        Ok(added)
    }

    pub fn reset_categories(&mut self) -> Result<()> {
        self.categories.commit(&self.db, seed::seed_categories())
    }

    // ========================================
    // User
    // ========================================

    /// Replace the local identity; the name is trimmed and must not be empty
    pub fn set_user_name(&mut self, name: &str) -> Result<&User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::ValidationError(
                "User name cannot be empty".to_string(),
            ));
        }
        let user = User::named(name);
        self.db.save(USER_KEY, &serde_json::to_string(&user)?)?;
        self.user = user;
        Ok(&self.user)
    }

    // ========================================
    // Lifecycle, import and export
    // ========================================

    /// Drop all local changes and restore every collection's defaults
    ///
    /// Written in one transaction; on failure nothing changes.
    pub fn reset_to_seed(&mut self) -> Result<()> {
        let prompts = seed::seed_prompts();
        let categories = seed::seed_categories();
        let user = seed::seed_user();

        self.db.replace_all(&[
            self.prompts.encode(&prompts)?,
            self.categories.encode(&categories)?,
            (USER_KEY, serde_json::to_string(&user)?),
        ])?;

        self.prompts.swap(prompts);
        self.categories.swap(categories);
        self.user = user;
        info!("store reset to seed data");
        Ok(())
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.prompts(), self.categories())
    }

    /// Classify `payload` against the current snapshots
    pub fn preview_import(&self, payload: &Value) -> ImportPreview {
        plan_import(payload, self.prompts(), self.categories())
    }

    /// Commit a previewed import: categories, then prompts, in one transaction
    ///
    /// Category references are checked again against the merged categories,
    /// since the vault may have changed since the preview. Prompts whose
    /// category no longer exists are counted as invalid.
    pub fn apply_import(&mut self, preview: &ImportPreview) -> Result<ImportOutcome> {
        let categories = merge_categories(self.categories(), &preview.categories);
        let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        let (placeable, dangling): (Vec<Prompt>, Vec<Prompt>) = preview
            .validation
            .valid_prompts
            .iter()
            .cloned()
            .partition(|p| known.contains(p.category_id.as_str()));
        if !dangling.is_empty() {
            warn!(count = dangling.len(), "imported prompts reference missing categories, skipping");
        }
        let prompts = merge_prompts(self.prompts(), &placeable);

        let categories_imported = categories.len() - self.categories().len();
        let prompts_imported = prompts.len() - self.prompts().len();
        if categories_imported > 0 || prompts_imported > 0 {
            self.db.save_many(&[
                self.categories.encode(&categories)?,
                self.prompts.encode(&prompts)?,
            ])?;
            self.categories.swap(categories);
            self.prompts.swap(prompts);
        }

        let outcome = ImportOutcome {
            prompts_imported,
            prompts_skipped: placeable.len() - prompts_imported,
            prompts_invalid: preview.validation.invalid_prompts.len() + dangling.len(),
            categories_imported,
        };
        info!(
            imported = outcome.prompts_imported,
            skipped = outcome.prompts_skipped,
            invalid = outcome.prompts_invalid,
            categories = outcome.categories_imported,
            "import applied"
        );
        Ok(outcome)
    }

    // ========================================
    // Helpers
    // ========================================

    fn require_prompt(&self, id: &str) -> Result<&Prompt> {
        self.prompts.get(id).ok_or_else(|| VaultError::NotFound {
            collection: "Prompt",
            id:         id.to_string(),
        })
    }

    fn replace_prompt(&mut self, prompt: Prompt) -> Result<()> {
        let records = self
            .prompts()
            .iter()
            .map(|p| if p.id == prompt.id { prompt.clone() } else { p.clone() })
            .collect();
        self.prompts.commit(&self.db, records)
    }

    /// Same content rules the importer applies, plus category existence
    fn check_prompt_fields(&self, title: &str, content: &str, category_id: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(VaultError::ValidationError("Title cannot be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(VaultError::ValidationError(format!(
                "Title too long (max {} characters)",
                MAX_TITLE_LENGTH
            )));
        }
        if content.trim().is_empty() {
            return Err(VaultError::ValidationError("Content cannot be empty".to_string()));
        }
        if !self.categories.contains(category_id) {
            return Err(VaultError::ValidationError(format!(
                "Category \"{}\" does not exist",
                category_id
            )));
        }
        Ok(())
    }
}
