use axum::{extract::State, http::StatusCode};
use mealadapt_core::domain::authentication::ports::AuthService;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    summary = "Logout",
    description = "Revokes every refresh token of the caller",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.logout(identity).await?;

    Ok(StatusCode::NO_CONTENT)
}
