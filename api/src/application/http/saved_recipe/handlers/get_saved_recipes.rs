use axum::extract::{Query, State};
use mealadapt_core::domain::saved_recipe::{
    ports::SavedRecipeService, value_objects::GetSavedRecipesFilter,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        saved_recipe::validators::{GetSavedRecipesParams, SavedRecipesResponse},
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "saved-recipes",
    summary = "List saved recipes",
    description = "Newest first, optionally restricted to favourites or a tag",
    params(GetSavedRecipesParams),
    responses(
        (status = 200, body = SavedRecipesResponse)
    )
)]
pub async fn get_saved_recipes(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Query(params): Query<GetSavedRecipesParams>,
) -> Result<Response<SavedRecipesResponse>, ApiError> {
    let (data, total) = state
        .service
        .get_saved_recipes(
            identity,
            GetSavedRecipesFilter {
                favorites_only: params.favorites_only,
                tag: params.tag,
                limit: params.limit,
                offset: params.offset,
            },
        )
        .await?;

    Ok(Response::OK(SavedRecipesResponse { data, total }))
}
