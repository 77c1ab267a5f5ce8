use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnalyzeRecipeRequest {
    #[validate(length(
        min = 1,
        max = 20000,
        message = "recipe_text must be between 1 and 20000 characters"
    ))]
    pub recipe_text: String,
    /// Analyse only these members. Omit to analyse the whole household.
    #[serde(default)]
    pub member_ids: Option<Vec<Uuid>>,
}
