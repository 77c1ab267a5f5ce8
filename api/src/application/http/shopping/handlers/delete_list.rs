use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use mealadapt_core::domain::shopping::ports::ShoppingService;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
};

#[utoipa::path(
    delete,
    path = "/lists/{list_id}",
    tag = "shopping",
    summary = "Delete shopping list",
    params(
        ("list_id" = Uuid, Path, description = "Shopping list ID"),
    ),
    responses(
        (status = 204, description = "List deleted"),
        (status = 404, description = "List not found")
    )
)]
pub async fn delete_list(
    Path(list_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.delete_list(identity, list_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
