use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PantryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PantryItem {
    pub fn new(user_id: Uuid, name: String, category: Option<String>) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            name,
            category,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeSuggestion {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub matching_ingredients: Vec<String>,
    pub additional_ingredients: Vec<String>,
    pub safety_notes: String,
    /// 1 (least) to 5 (most) family friendly.
    pub family_friendly_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeSuggestions {
    pub suggestions: Vec<RecipeSuggestion>,
    #[serde(default)]
    pub tips: Vec<String>,
}
