use axum::extract::State;
use mealadapt_core::domain::scan::{entities::IngredientSafetyReport, ports::ScanService};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        scan::validators::AnalyzeIngredientsRequest,
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
    path = "/ingredients",
    tag = "scan",
    summary = "Analyze ingredient list",
    request_body = AnalyzeIngredientsRequest,
    responses(
        (status = 200, body = IngredientSafetyReport),
        (status = 400, description = "No ingredients or empty family profile")
    )
)]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<AnalyzeIngredientsRequest>,
) -> Result<Response<IngredientSafetyReport>, ApiError> {
    let report = state
        .service
        .analyze_ingredients(identity, payload.ingredients)
        .await?;

    Ok(Response::OK(report))
}
