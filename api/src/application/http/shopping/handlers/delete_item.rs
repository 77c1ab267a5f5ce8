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
    path = "/items/{item_id}",
    tag = "shopping",
    summary = "Delete shopping item",
    params(
        ("item_id" = Uuid, Path, description = "Shopping item ID"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    Path(item_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<StatusCode, ApiError> {
    state.service.delete_item(identity, item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
