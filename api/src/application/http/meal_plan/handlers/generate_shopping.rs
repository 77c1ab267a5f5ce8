use axum::extract::{Path, State};
use mealadapt_core::domain::{
    meal_plan::{ports::MealPlanService, value_objects::GenerateShoppingFromPlanInput},
    shopping::entities::ShoppingList,
};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        meal_plan::validators::GenerateShoppingFromPlanRequest,
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
    path = "/{plan_id}/generate-shopping",
    tag = "meal-plans",
    summary = "Shopping list from meal plan",
    description = "Extracts and consolidates the ingredients of every recipe planned in the week",
    params(
        ("plan_id" = Uuid, Path, description = "Meal plan ID"),
    ),
    request_body = GenerateShoppingFromPlanRequest,
    responses(
        (status = 201, body = ShoppingList),
        (status = 400, body = ApiErrorResponse, description = "The plan has no meals"),
        (status = 404, body = ApiErrorResponse, description = "Plan not found"),
        (status = 429, body = ApiErrorResponse, description = "Daily extraction budget exhausted")
    )
)]
pub async fn generate_shopping(
    Path(plan_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<GenerateShoppingFromPlanRequest>,
) -> Result<Response<ShoppingList>, ApiError> {
    let list = state
        .service
        .generate_shopping(
            identity,
            GenerateShoppingFromPlanInput {
                plan_id,
                list_name: payload.list_name,
            },
        )
        .await?;

    Ok(Response::Created(list))
}
