use axum::{extract::State, http::StatusCode};
use mealadapt_core::domain::authentication::{
    ports::AuthService, value_objects::ChangePasswordInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        authentication::validators::ChangePasswordRequest,
        server::{
            api_entities::api_error::{ApiError, ValidateJson},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/me/password",
    tag = "auth",
    summary = "Change password",
    description = "Requires the current password. Every session of the caller is logged out",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .change_password(
            identity,
            ChangePasswordInput {
                current_password: payload.current_password,
                new_password: payload.new_password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
