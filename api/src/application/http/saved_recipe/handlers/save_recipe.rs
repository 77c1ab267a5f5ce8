use axum::extract::State;
use mealadapt_core::domain::saved_recipe::{
    entities::SavedRecipe, ports::SavedRecipeService, value_objects::SaveRecipeInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        saved_recipe::validators::SaveRecipeRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "saved-recipes",
    summary = "Save recipe",
    description = "Stores a recipe together with an optional snapshot of its analysis",
    request_body = SaveRecipeRequest,
    responses(
        (status = 201, body = SavedRecipe),
        (status = 400, description = "Invalid recipe")
    )
)]
pub async fn save_recipe(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<SaveRecipeRequest>,
) -> Result<Response<SavedRecipe>, ApiError> {
    let recipe = state
        .service
        .save_recipe(
            identity,
            SaveRecipeInput {
                dish_name: payload.dish_name,
                recipe_text: payload.recipe_text,
                analysis: payload.analysis,
                notes: payload.notes,
                tags: payload.tags,
            },
        )
        .await?;

    Ok(Response::Created(recipe))
}
