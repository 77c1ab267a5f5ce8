use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use mealadapt_core::domain::meal_plan::ports::MealPlanService;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    delete,
    path = "/meals/{meal_id}",
    tag = "meal-plans",
    summary = "Remove planned meal",
    params(
        ("meal_id" = Uuid, Path, description = "Planned meal ID"),
    ),
    responses(
        (status = 204, description = "Meal removed"),
        (status = 404, description = "Meal not found")
    )
)]
pub async fn delete_meal(
    Path(meal_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.remove_meal(identity, meal_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
