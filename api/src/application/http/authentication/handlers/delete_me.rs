use axum::{extract::State, http::StatusCode};
use mealadapt_core::domain::authentication::ports::AuthService;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    delete,
    path = "/me",
    tag = "auth",
    summary = "Delete account",
    description = "Deletes the caller together with the family profile and everything saved",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn delete_me(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.delete_me(identity).await?;

    Ok(StatusCode::NO_CONTENT)
}
