use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use mealadapt_core::domain::family::ports::FamilyService;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    delete,
    path = "/member/{member_id}",
    tag = "family",
    summary = "Delete family member",
    params(
        ("member_id" = Uuid, Path, description = "Member ID"),
    ),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    Path(member_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.delete_member(identity, member_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
