use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use mealadapt_core::domain::saved_recipe::ports::SavedRecipeService;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    delete,
    path = "/{recipe_id}",
    tag = "saved-recipes",
    summary = "Delete saved recipe",
    params(
        ("recipe_id" = Uuid, Path, description = "Saved recipe ID"),
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn delete_saved_recipe(
    Path(recipe_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.delete_saved_recipe(identity, recipe_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
