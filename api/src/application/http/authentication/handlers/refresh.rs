use axum::extract::State;
use mealadapt_core::domain::authentication::{entities::AuthSession, ports::AuthService};

use crate::application::http::{
    authentication::validators::RefreshRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/refresh",
    tag = "auth",
    summary = "Refresh tokens",
    description = "Consumes a refresh token and returns a new token pair. A refresh token can be used only once.",
    request_body = RefreshRequest,
    responses(
        (status = 200, body = AuthSession),
        (status = 401, description = "Refresh token invalid, expired or already used")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RefreshRequest>,
) -> Result<Response<AuthSession>, ApiError> {
    let session = state.service.refresh(payload.refresh_token).await?;

    Ok(Response::OK(session))
}
