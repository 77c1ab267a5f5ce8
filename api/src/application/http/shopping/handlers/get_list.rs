use axum::extract::{Path, State};
use mealadapt_core::domain::shopping::{entities::ShoppingList, ports::ShoppingService};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/lists/{list_id}",
    tag = "shopping",
    summary = "Get shopping list",
    params(
        ("list_id" = Uuid, Path, description = "Shopping list ID"),
    ),
    responses(
        (status = 200, body = ShoppingList),
        (status = 404, description = "List not found")
    )
)]
pub async fn get_list(
    Path(list_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ShoppingList>, ApiError> {
    let list = state.service.get_list(identity, list_id).await?;

    Ok(Response::OK(list))
}
