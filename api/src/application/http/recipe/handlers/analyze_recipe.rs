use axum::extract::State;
use mealadapt_core::domain::recipe_analysis::{
    entities::RecipeAnalysis, ports::RecipeAnalysisService, value_objects::AnalyzeRecipeInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recipe::validators::AnalyzeRecipeRequest,
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
    path = "/analyze",
    tag = "recipe",
    summary = "Analyze recipe",
    description = "Produces one verdict per family member for the given recipe text",
    request_body = AnalyzeRecipeRequest,
    responses(
        (status = 200, body = RecipeAnalysis),
        (status = 400, body = ApiErrorResponse, description = "Empty recipe, empty profile or unknown member id"),
        (status = 429, body = ApiErrorResponse, description = "Daily analysis budget exhausted"),
        (status = 502, body = ApiErrorResponse, description = "Model output could not be validated"),
        (status = 504, body = ApiErrorResponse, description = "Model call timed out")
    )
)]
pub async fn analyze_recipe(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<AnalyzeRecipeRequest>,
) -> Result<Response<RecipeAnalysis>, ApiError> {
    let analysis = state
        .service
        .analyze_recipe(
            identity,
            AnalyzeRecipeInput {
                recipe_text: payload.recipe_text,
                member_ids: payload.member_ids,
            },
        )
        .await?;

    Ok(Response::OK(analysis))
}
