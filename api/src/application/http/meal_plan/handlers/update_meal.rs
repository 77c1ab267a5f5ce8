use axum::extract::{Path, State};
use mealadapt_core::domain::meal_plan::{
    entities::PlannedMeal, ports::MealPlanService, value_objects::UpdateMealInput,
};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        meal_plan::validators::UpdateMealRequest,
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
    put,
    path = "/meals/{meal_id}",
    tag = "meal-plans",
    summary = "Update planned meal",
    description = "Only the fields present are changed. A new date in another week moves the meal to that week's plan",
    params(
        ("meal_id" = Uuid, Path, description = "Planned meal ID"),
    ),
    request_body = UpdateMealRequest,
    responses(
        (status = 200, body = PlannedMeal),
        (status = 404, body = ApiErrorResponse, description = "Meal or recipe not found")
    )
)]
pub async fn update_meal(
    Path(meal_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateMealRequest>,
) -> Result<Response<PlannedMeal>, ApiError> {
    let meal = state
        .service
        .update_meal(
            identity,
            UpdateMealInput {
                meal_id,
                recipe_id: payload.recipe_id,
                date: payload.date,
                meal_type: payload.meal_type,
                servings: payload.servings,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Response::OK(meal))
}
