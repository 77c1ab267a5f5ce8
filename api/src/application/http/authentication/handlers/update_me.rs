use axum::extract::State;
use mealadapt_core::domain::{
    authentication::{ports::AuthService, value_objects::UpdateProfileInput},
    user::entities::User,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        authentication::validators::UpdateMeRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/me",
    tag = "auth",
    summary = "Update current user",
    description = "Changes the name and/or email of the caller",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, body = User),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateMeRequest>,
) -> Result<Response<User>, ApiError> {
    let user = state
        .service
        .update_me(
            identity,
            UpdateProfileInput {
                name: payload.name,
                email: payload.email,
            },
        )
        .await?;

    Ok(Response::OK(user))
}
