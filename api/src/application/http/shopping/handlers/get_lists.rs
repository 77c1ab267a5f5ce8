use axum::extract::State;
use mealadapt_core::domain::shopping::ports::ShoppingService;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
        shopping::validators::ShoppingListsResponse,
    },
};

#[utoipa::path(
    get,
    path = "/lists",
    tag = "shopping",
    summary = "List shopping lists",
    responses(
        (status = 200, body = ShoppingListsResponse)
    )
)]
pub async fn get_lists(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ShoppingListsResponse>, ApiError> {
    let lists = state.service.get_lists(identity).await?;

    Ok(Response::OK(ShoppingListsResponse { data: lists }))
}
