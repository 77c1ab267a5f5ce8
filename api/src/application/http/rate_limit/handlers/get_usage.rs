use axum::extract::State;
use mealadapt_core::domain::llm::{ports::UsageService, rate_limit::EndpointUsage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UsageResponse {
    pub data: Vec<EndpointUsage>,
}

#[utoipa::path(
    get,
    path = "/usage",
    tag = "rate-limits",
    summary = "AI usage",
    description = "Calls made, limit and remaining budget per AI endpoint in the current window",
    responses(
        (status = 200, body = UsageResponse)
    )
)]
pub async fn get_usage(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<UsageResponse>, ApiError> {
    let usage = state.service.get_usage(identity).await?;

    Ok(Response::OK(UsageResponse { data: usage }))
}
