use axum::extract::{Path, State};
use mealadapt_core::domain::saved_recipe::{
    entities::SavedRecipe, ports::SavedRecipeService, value_objects::UpdateSavedRecipeInput,
};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        saved_recipe::validators::UpdateSavedRecipeRequest,
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
    put,
    path = "/{recipe_id}",
    tag = "saved-recipes",
    summary = "Update saved recipe",
    description = "Updates the favourite flag, notes or tags. Omitted fields are left unchanged.",
    params(
        ("recipe_id" = Uuid, Path, description = "Saved recipe ID"),
    ),
    request_body = UpdateSavedRecipeRequest,
    responses(
        (status = 200, body = SavedRecipe),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn update_saved_recipe(
    Path(recipe_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateSavedRecipeRequest>,
) -> Result<Response<SavedRecipe>, ApiError> {
    let recipe = state
        .service
        .update_saved_recipe(
            identity,
            UpdateSavedRecipeInput {
                recipe_id,
                is_favorite: payload.is_favorite,
                notes: payload.notes,
                tags: payload.tags,
            },
        )
        .await?;

    Ok(Response::OK(recipe))
}
