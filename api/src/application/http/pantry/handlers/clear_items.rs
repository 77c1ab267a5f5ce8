use axum::extract::State;
use mealadapt_core::domain::pantry::ports::PantryService;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::ClearPantryResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    delete,
    path = "/items",
    tag = "pantry",
    summary = "Clear pantry",
    description = "Deletes every pantry item of the caller",
    responses(
        (status = 200, body = ClearPantryResponse)
    )
)]
pub async fn clear_items(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ClearPantryResponse>, ApiError> {
    let deleted = state.service.clear_items(identity).await?;

    Ok(Response::OK(ClearPantryResponse { deleted }))
}
