use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, recipe_analysis::entities::RecipeAnalysis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedRecipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_name: String,
    pub recipe_text: String,
    /// Copy of the analysis at save time; later profile edits do not touch it.
    pub analysis: Option<RecipeAnalysis>,
    pub is_favorite: bool,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SavedRecipeConfig {
    pub user_id: Uuid,
    pub dish_name: String,
    pub recipe_text: String,
    pub analysis: Option<RecipeAnalysis>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl SavedRecipe {
    pub fn new(config: SavedRecipeConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: config.user_id,
            dish_name: config.dish_name,
            recipe_text: config.recipe_text,
            analysis: config.analysis,
            is_favorite: false,
            notes: config.notes,
            tags: normalize_tags(config.tags),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(
        &mut self,
        is_favorite: Option<bool>,
        notes: Option<String>,
        tags: Option<Vec<String>>,
    ) {
        let (now, _) = generate_timestamp();

        if let Some(f) = is_favorite {
            self.is_favorite = f;
        }
        if let Some(n) = notes {
            self.notes = Some(n);
        }
        if let Some(t) = tags {
            self.tags = normalize_tags(t);
        }
        self.updated_at = now;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| *t == tag)
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_normalized() {
        let recipe = SavedRecipe::new(SavedRecipeConfig {
            user_id: Uuid::new_v4(),
            dish_name: "Soup".to_string(),
            recipe_text: "water, carrots".to_string(),
            analysis: None,
            notes: None,
            tags: vec![" Dinner".to_string(), "dinner".to_string(), "".to_string()],
        });

        assert_eq!(recipe.tags, vec!["dinner".to_string()]);
        assert!(recipe.has_tag("DINNER"));
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut recipe = SavedRecipe::new(SavedRecipeConfig {
            user_id: Uuid::new_v4(),
            dish_name: "Soup".to_string(),
            recipe_text: "water, carrots".to_string(),
            analysis: None,
            notes: Some("grandma's".to_string()),
            tags: vec![],
        });

        recipe.update(Some(true), None, None);

        assert!(recipe.is_favorite);
        assert_eq!(recipe.notes.as_deref(), Some("grandma's"));
    }
}
