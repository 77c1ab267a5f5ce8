use axum::extract::{Query, State};
use mealadapt_core::domain::meal_plan::{entities::MealPlan, ports::MealPlanService};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        meal_plan::validators::GetWeekParams,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "meal-plans",
    summary = "Get weekly meal plan",
    description = "Returns the plan of the week containing `week`, creating it empty on first access",
    params(GetWeekParams),
    responses(
        (status = 200, body = MealPlan)
    )
)]
pub async fn get_week(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Query(params): Query<GetWeekParams>,
) -> Result<Response<MealPlan>, ApiError> {
    let plan = state.service.get_week(identity, params.week).await?;

    Ok(Response::OK(plan))
}
