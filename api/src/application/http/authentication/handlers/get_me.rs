use axum::extract::State;
use mealadapt_core::domain::{authentication::ports::AuthService, user::entities::User};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    summary = "Current user",
    responses(
        (status = 200, body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<User>, ApiError> {
    let user = state.service.get_me(identity).await?;

    Ok(Response::OK(user))
}
