use axum::extract::State;
use mealadapt_core::domain::pantry::{
    entities::PantryItem, ports::PantryService, value_objects::AddPantryItemInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::AddPantryItemRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/items",
    tag = "pantry",
    summary = "Add pantry item",
    request_body = AddPantryItemRequest,
    responses(
        (status = 201, body = PantryItem),
        (status = 400, description = "Invalid item")
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<AddPantryItemRequest>,
) -> Result<Response<PantryItem>, ApiError> {
    let item = state
        .service
        .add_item(
            identity,
            AddPantryItemInput {
                name: payload.name,
                category: payload.category,
            },
        )
        .await?;

    Ok(Response::Created(item))
}
