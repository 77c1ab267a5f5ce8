use axum::extract::{Path, State};
use mealadapt_core::domain::barcode::{entities::Product, ports::BarcodeService};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{code}",
    tag = "barcode",
    summary = "Look up product",
    description = "Fetches product details from Open Food Facts",
    params(
        ("code" = String, Path, description = "EAN/UPC barcode, 8 to 14 digits"),
    ),
    responses(
        (status = 200, body = Product),
        (status = 400, description = "Malformed barcode"),
        (status = 404, description = "Product not found"),
        (status = 503, description = "Open Food Facts unavailable")
    )
)]
pub async fn lookup_product(
    Path(code): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Product>, ApiError> {
    let product = state.service.lookup_product(identity, code).await?;

    Ok(Response::OK(product))
}
