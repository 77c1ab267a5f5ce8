use axum::extract::{Path, State};
use mealadapt_core::domain::shopping::{
    entities::ShoppingItem, ports::ShoppingService, value_objects::UpdateShoppingItemInput,
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
        shopping::validators::UpdateShoppingItemRequest,
    },
};

#[utoipa::path(
    put,
    path = "/items/{item_id}",
    tag = "shopping",
    summary = "Update shopping item",
    description = "Toggles the checked flag or changes the quantity",
    params(
        ("item_id" = Uuid, Path, description = "Shopping item ID"),
    ),
    request_body = UpdateShoppingItemRequest,
    responses(
        (status = 200, body = ShoppingItem),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    Path(item_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateShoppingItemRequest>,
) -> Result<Response<ShoppingItem>, ApiError> {
    let item = state
        .service
        .update_item(
            identity,
            UpdateShoppingItemInput {
                item_id,
                is_checked: payload.is_checked,
                quantity: payload.quantity,
            },
        )
        .await?;

    Ok(Response::OK(item))
}
