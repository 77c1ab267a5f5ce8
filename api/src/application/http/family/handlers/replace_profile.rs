use axum::extract::State;
use mealadapt_core::domain::family::{
    entities::FamilyProfile, ports::FamilyService, value_objects::CreateMemberInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        family::validators::ProfileRequest,
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
    post,
    path = "/profile",
    tag = "family",
    summary = "Replace family profile",
    description = "Swaps the whole household for the submitted members, keeping their order",
    request_body = ProfileRequest,
    responses(
        (status = 200, body = FamilyProfile),
        (status = 400, description = "A member is invalid; the existing profile is kept")
    )
)]
pub async fn replace_profile(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ProfileRequest>,
) -> Result<Response<FamilyProfile>, ApiError> {
    let members = payload
        .members
        .into_iter()
        .map(|m| CreateMemberInput {
            name: m.name,
            avatar: m.avatar,
            role: m.role,
            conditions: m.conditions,
            custom_restrictions: m.custom_restrictions,
        })
        .collect();

    let profile = state.service.replace_profile(identity, members).await?;

    Ok(Response::OK(profile))
}
