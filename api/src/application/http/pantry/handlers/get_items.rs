use axum::extract::State;
use mealadapt_core::domain::pantry::ports::PantryService;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::PantryItemsResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/items",
    tag = "pantry",
    summary = "List pantry items",
    responses(
        (status = 200, body = PantryItemsResponse)
    )
)]
pub async fn get_items(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<PantryItemsResponse>, ApiError> {
    let items = state.service.get_items(identity).await?;

    Ok(Response::OK(PantryItemsResponse { data: items }))
}
