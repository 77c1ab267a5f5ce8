use axum::extract::State;
use mealadapt_core::domain::shopping::{
    entities::ShoppingList, ports::ShoppingService, value_objects::CreateShoppingListInput,
};

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
        shopping::validators::CreateShoppingListRequest,
    },
};

#[utoipa::path(
    post,
    path = "/lists",
    tag = "shopping",
    summary = "Create shopping list",
    request_body = CreateShoppingListRequest,
    responses(
        (status = 201, body = ShoppingList),
        (status = 400, description = "Invalid list")
    )
)]
pub async fn create_list(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateShoppingListRequest>,
) -> Result<Response<ShoppingList>, ApiError> {
    let list = state
        .service
        .create_list(
            identity,
            CreateShoppingListInput {
                name: payload.name,
                items: payload.items.into_iter().map(Into::into).collect(),
            },
        )
        .await?;

    Ok(Response::Created(list))
}
