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
    post,
    path = "/lists/{list_id}/complete",
    tag = "shopping",
    summary = "Complete shopping list",
    description = "Marks the list as completed. Completing an already completed list keeps its original timestamp.",
    params(
        ("list_id" = Uuid, Path, description = "Shopping list ID"),
    ),
    responses(
        (status = 200, body = ShoppingList),
        (status = 404, description = "List not found")
    )
)]
pub async fn complete_list(
    Path(list_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ShoppingList>, ApiError> {
    let list = state.service.complete_list(identity, list_id).await?;

    Ok(Response::OK(list))
}
