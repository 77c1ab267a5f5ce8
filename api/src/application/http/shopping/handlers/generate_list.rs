use axum::extract::State;
use mealadapt_core::domain::shopping::{
    entities::ShoppingList, ports::ShoppingService, value_objects::GenerateShoppingListInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
        shopping::validators::GenerateShoppingListRequest,
    },
};

#[utoipa::path(
    post,
    path = "/lists/generate",
    tag = "shopping",
    summary = "Generate shopping list",
    description = "Extracts and consolidates the ingredients of saved recipes into a new list",
    request_body = GenerateShoppingListRequest,
    responses(
        (status = 201, body = ShoppingList),
        (status = 400, body = ApiErrorResponse, description = "None of the recipes belong to the caller"),
        (status = 429, body = ApiErrorResponse, description = "Daily extraction budget exhausted")
    )
)]
pub async fn generate_list(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<GenerateShoppingListRequest>,
) -> Result<Response<ShoppingList>, ApiError> {
    let list = state
        .service
        .generate_list(
            identity,
            GenerateShoppingListInput {
                name: payload.name,
                recipe_ids: payload.recipe_ids,
            },
        )
        .await?;

    Ok(Response::Created(list))
}
