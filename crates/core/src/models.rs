//! Domain records: prompts, categories and the local user identity
//!
//! Field names serialize in camelCase so stored data and export files share
//! one shape with the import format.

use serde::{Deserialize, Serialize};

/// A reusable prompt in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id:          String,
    pub title:       String,
    pub content:     String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
    pub tags:        Vec<String>,
    pub view_count:  u64,
    pub author:      String,
    /// Epoch milliseconds
    pub created_at:  i64,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id:    String,
    pub name:  String,
    /// Hex color token, e.g. `#3b82f6`
    pub color: String,
}

/// Local identity shown as the author of new prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name:            String,
    pub avatar_initials: String,
}

impl User {
    /// Build a user, deriving initials from the first two characters of the name
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let avatar_initials = name.chars().take(2).collect::<String>().to_uppercase();
        Self {
            name,
            avatar_initials,
        }
    }
}

impl Default for User {
    fn default() -> Self {
        User::named("Guest")
    }
}

/// Fields supplied when creating a prompt by hand
///
/// `id`, `viewCount` and `createdAt` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrompt {
    pub title:       String,
    pub content:     String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub tags:        Vec<String>,
    pub author:      String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewPrompt {
    pub(crate) fn into_prompt(self, id: String, created_at: i64) -> Prompt {
        Prompt {
            id,
            title: self.title,
            content: self.content,
            description: self.description,
            category_id: self.category_id,
            tags: self.tags,
            view_count: 0,
            author: self.author,
            created_at,
            is_favorite: self.is_favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name:  String,
    pub color: String,
}

/// Partial update applied over an existing prompt
///
/// `id`, `viewCount` and `createdAt` are deliberately absent: they only
/// change through their own store operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptPatch {
    pub title:       Option<String>,
    pub content:     Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub tags:        Option<Vec<String>>,
    pub author:      Option<String>,
    pub is_favorite: Option<bool>,
}

impl PromptPatch {
    /// Overlay every supplied field onto `prompt`
    pub fn apply_to(&self, prompt: &mut Prompt) {
        if let Some(title) = &self.title {
            prompt.title = title.clone();
        }
        if let Some(content) = &self.content {
            prompt.content = content.clone();
        }
        if let Some(description) = &self.description {
            prompt.description = Some(description.clone());
        }
        if let Some(category_id) = &self.category_id {
            prompt.category_id = category_id.clone();
        }
        if let Some(tags) = &self.tags {
            prompt.tags = tags.clone();
        }
        if let Some(author) = &self.author {
            prompt.author = author.clone();
        }
        if let Some(is_favorite) = self.is_favorite {
            prompt.is_favorite = is_favorite;
        }
    }
}
