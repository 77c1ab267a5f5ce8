use uuid::Uuid;

use crate::domain::recipe_analysis::entities::RecipeAnalysis;

pub struct SaveRecipeInput {
    pub dish_name: String,
    pub recipe_text: String,
    pub analysis: Option<RecipeAnalysis>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

pub struct UpdateSavedRecipeInput {
    pub recipe_id: Uuid,
    pub is_favorite: Option<bool>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct GetSavedRecipesFilter {
    pub favorites_only: bool,
    pub tag: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
