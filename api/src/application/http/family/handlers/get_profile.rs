use axum::extract::State;
use mealadapt_core::domain::family::{entities::FamilyProfile, ports::FamilyService};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/profile",
    tag = "family",
    summary = "Get family profile",
    description = "Lists the caller's household members in the order they were added",
    responses(
        (status = 200, body = FamilyProfile),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<FamilyProfile>, ApiError> {
    let profile = state.service.get_profile(identity).await?;

    Ok(Response::OK(profile))
}
