use axum::extract::{Path, State};
use mealadapt_core::domain::family::{
    entities::FamilyMember, ports::FamilyService, value_objects::UpdateMemberInput,
};
use uuid::Uuid;

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
    put,
    path = "/member/{member_id}",
    tag = "family",
    summary = "Replace family member",
    description = "Replaces every editable field of the member",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
    ),
    request_body = MemberRequest,
    responses(
        (status = 200, body = FamilyMember),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    Path(member_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<MemberRequest>,
) -> Result<Response<FamilyMember>, ApiError> {
    let member = state
        .service
        .update_member(
            identity,
            UpdateMemberInput {
                member_id,
                name: payload.name,
                avatar: payload.avatar,
                role: payload.role,
                conditions: payload.conditions,
                custom_restrictions: payload.custom_restrictions,
            },
        )
        .await?;

    Ok(Response::OK(member))
}
