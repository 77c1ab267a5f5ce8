use axum::extract::State;
use mealadapt_core::domain::family::{
    entities::FamilyMember, ports::FamilyService, value_objects::CreateMemberInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        family::validators::MemberRequest,
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
    path = "/member",
    tag = "family",
    summary = "Add family member",
    request_body = MemberRequest,
    responses(
        (status = 201, body = FamilyMember),
        (status = 400, description = "Invalid member, e.g. a condition listed twice")
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<MemberRequest>,
) -> Result<Response<FamilyMember>, ApiError> {
    let member = state
        .service
        .add_member(
            identity,
            CreateMemberInput {
                name: payload.name,
                avatar: payload.avatar,
                role: payload.role,
                conditions: payload.conditions,
                custom_restrictions: payload.custom_restrictions,
            },
        )
        .await?;

    Ok(Response::Created(member))
}
