use axum::extract::State;
use mealadapt_core::domain::authentication::{
    entities::AuthSession, ports::AuthService, value_objects::LoginInput,
};

use crate::application::http::{
    authentication::validators::LoginRequest,
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
    path = "/login",
    tag = "auth",
    summary = "Login",
    description = "Exchanges email and password for a token pair",
    request_body = LoginRequest,
    responses(
        (status = 200, body = AuthSession),
        (status = 401, description = "Incorrect email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<LoginRequest>,
) -> Result<Response<AuthSession>, ApiError> {
    let session = state
        .service
        .login(LoginInput {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Response::OK(session))
}
