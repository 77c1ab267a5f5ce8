use axum::extract::{Path, State};
use mealadapt_core::domain::saved_recipe::{entities::SavedRecipe, ports::SavedRecipeService};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{recipe_id}",
    tag = "saved-recipes",
    summary = "Get saved recipe",
    params(
        ("recipe_id" = Uuid, Path, description = "Saved recipe ID"),
    ),
    responses(
        (status = 200, body = SavedRecipe),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_saved_recipe(
    Path(recipe_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<SavedRecipe>, ApiError> {
    let recipe = state.service.get_saved_recipe(identity, recipe_id).await?;

    Ok(Response::OK(recipe))
}
