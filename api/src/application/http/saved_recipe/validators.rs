use mealadapt_core::domain::{
    recipe_analysis::entities::RecipeAnalysis, saved_recipe::entities::SavedRecipe,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "dish_name must be between 1 and 200 characters"))]
    pub dish_name: String,
    #[validate(length(min = 1, message = "recipe_text is required"))]
    pub recipe_text: String,
    #[serde(default)]
    pub analysis: Option<RecipeAnalysis>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "at most 20 tags are allowed"))]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSavedRecipeRequest {
    pub is_favorite: Option<bool>,
    pub notes: Option<String>,
    #[validate(length(max = 20, message = "at most 20 tags are allowed"))]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GetSavedRecipesParams {
    #[serde(default)]
    pub favorites_only: bool,
    pub tag: Option<String>,
    #[schema(example = 20)]
    pub limit: Option<u32>,
    #[schema(example = 0)]
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SavedRecipesResponse {
    pub data: Vec<SavedRecipe>,
    /// Number of recipes matching the filter, before paging.
    pub total: usize,
}
