use axum::extract::State;
use mealadapt_core::domain::meal_plan::{
    entities::PlannedMeal, ports::MealPlanService, value_objects::AddMealInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        meal_plan::validators::AddMealRequest,
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
    path = "/meals",
    tag = "meal-plans",
    summary = "Plan a meal",
    description = "Adds a saved recipe to the plan of the week containing `date`",
    request_body = AddMealRequest,
    responses(
        (status = 201, body = PlannedMeal),
        (status = 404, body = ApiErrorResponse, description = "Recipe not found")
    )
)]
pub async fn add_meal(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<AddMealRequest>,
) -> Result<Response<PlannedMeal>, ApiError> {
    let meal = state
        .service
        .add_meal(
            identity,
            AddMealInput {
                recipe_id: payload.recipe_id,
                date: payload.date,
                meal_type: payload.meal_type,
                servings: payload.servings,
                notes: payload.notes,
            },
        )
        .await?;

    Ok(Response::Created(meal))
}
