use axum::extract::State;
use mealadapt_core::domain::authentication::{
    entities::AuthSession, ports::AuthService, value_objects::RegisterInput,
};

use crate::application::http::{
    authentication::validators::RegisterRequest,
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
    path = "/register",
    tag = "auth",
    summary = "Register",
    description = "Creates an account and returns a token pair",
    request_body = RegisterRequest,
    responses(
        (status = 201, body = AuthSession, description = "Account created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RegisterRequest>,
) -> Result<Response<AuthSession>, ApiError> {
    let session = state
        .service
        .register(RegisterInput {
            email: payload.email,
            name: payload.name,
            password: payload.password,
        })
        .await?;

    Ok(Response::Created(session))
}
