//! Default collections restored on first run and on reset

use chrono::Utc;

use crate::models::{Category, Prompt, User};

fn category(id: &str, name: &str, color: &str) -> Category {
    Category {
        id:    id.to_string(),
        name:  name.to_string(),
        color: color.to_string(),
    }
}

pub fn seed_categories() -> Vec<Category> {
    vec![
        category("cat_1", "Coding", "#3b82f6"),
        category("cat_2", "Writing", "#10b981"),
        category("cat_3", "Marketing", "#f59e0b"),
        category("cat_4", "Productivity", "#8b5cf6"),
    ]
}

/// Seed prompts, stamped with the current time
pub fn seed_prompts() -> Vec<Prompt> {
    let now = Utc::now().timestamp_millis();
    let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    vec![
        Prompt {
            id:          "p_1".to_string(),
            title:       "React Component Generator".to_string(),
            description: Some("Generate a functional React component with Tailwind CSS.".to_string()),
            content:     "Act as an expert React developer. Create a [Component Name] component using React, TypeScript, and Tailwind CSS. Ensure it is responsive and accessible.".to_string(),
            category_id: "cat_1".to_string(),
            tags:        tags(&["react", "typescript", "frontend"]),
            view_count:  120,
            author:      "System".to_string(),
            created_at:  now,
            is_favorite: true,
        },
        Prompt {
            id:          "p_2".to_string(),
            title:       "SEO Blog Post Outliner".to_string(),
            description: Some("Create a structured outline for an SEO-optimized blog post.".to_string()),
            content:     "Create a comprehensive outline for a blog post about [Topic]. Include H2 and H3 headings, key points for each section, and suggested keywords to target.".to_string(),
            category_id: "cat_3".to_string(),
            tags:        tags(&["seo", "content", "marketing"]),
            view_count:  85,
            author:      "System".to_string(),
            created_at:  now,
            is_favorite: false,
        },
        Prompt {
            id:          "p_3".to_string(),
            title:       "Email Professionalizer".to_string(),
            description: Some("Rewrite casual emails to be professional and polite.".to_string()),
            content:     "Rewrite the following email to be professional, concise, and polite, while maintaining a firm tone: \n\n[Insert Draft]".to_string(),
            category_id: "cat_2".to_string(),
            tags:        tags(&["email", "business", "writing"]),
            view_count:  200,
            author:      "System".to_string(),
            created_at:  now,
            is_favorite: false,
        },
    ]
}

pub fn seed_user() -> User {
    User::default()
}
