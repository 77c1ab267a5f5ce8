use axum::extract::{Path, State};
use mealadapt_core::domain::shopping::{
    entities::ShoppingItem, ports::ShoppingService, value_objects::AddShoppingItemInput,
};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
        shopping::validators::ShoppingItemRequest,
    },
};

#[utoipa::path(
    post,
    path = "/lists/{list_id}/items",
    tag = "shopping",
    summary = "Add shopping item",
    params(
        ("list_id" = Uuid, Path, description = "Shopping list ID"),
    ),
    request_body = ShoppingItemRequest,
    responses(
        (status = 201, body = ShoppingItem),
        (status = 404, description = "List not found")
    )
)]
pub async fn add_item(
    Path(list_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ShoppingItemRequest>,
) -> Result<Response<ShoppingItem>, ApiError> {
    let item = state
        .service
        .add_item(
            identity,
            AddShoppingItemInput {
                list_id,
                item: payload.into(),
            },
        )
        .await?;

    Ok(Response::Created(item))
}
