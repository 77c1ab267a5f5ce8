use axum::extract::State;
use mealadapt_core::domain::pantry::{
    entities::RecipeSuggestions, ports::PantryService, value_objects::SuggestRecipesInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::SuggestRecipesRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/suggest-recipes",
    tag = "pantry",
    summary = "Suggest recipes",
    description = "Suggests family-friendly recipes from the given ingredients or the stored pantry",
    request_body = SuggestRecipesRequest,
    responses(
        (status = 200, body = RecipeSuggestions),
        (status = 400, body = ApiErrorResponse, description = "No ingredients available"),
        (status = 429, body = ApiErrorResponse, description = "Daily suggestion budget exhausted")
    )
)]
pub async fn suggest_recipes(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<SuggestRecipesRequest>,
) -> Result<Response<RecipeSuggestions>, ApiError> {
    let suggestions = state
        .service
        .suggest_recipes(
            identity,
            SuggestRecipesInput {
                ingredients: payload.ingredients,
            },
        )
        .await?;

    Ok(Response::OK(suggestions))
}
