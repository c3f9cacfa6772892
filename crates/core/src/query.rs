//! Read-only views over a prompt snapshot: search and most-viewed

use crate::models::Prompt;

/// How many prompts the most-viewed list shows by default
pub const DEFAULT_TOP_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `None` or `"ALL"` means no filter
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("ALL") => CategoryFilter::All,
            Some(id) => CategoryFilter::Only(id.to_string()),
        }
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => prompt.category_id == *id,
        }
    }
}

/// Case-insensitive match on title, content or any tag, within `filter`
pub fn search_prompts<'a>(prompts: &'a [Prompt], term: &str, filter: &CategoryFilter) -> Vec<&'a Prompt> {
    let needle = term.to_lowercase();
    prompts
        .iter()
        .filter(|p| filter.matches(p))
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.content.to_lowercase().contains(&needle)
                || p.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Highest `viewCount` first; ties keep collection order
pub fn top_prompts<'a>(prompts: &'a [Prompt], filter: &CategoryFilter, limit: usize) -> Vec<&'a Prompt> {
    let mut ranked: Vec<&Prompt> = prompts.iter().filter(|p| filter.matches(p)).collect();
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ranked.truncate(limit);
    ranked
}
