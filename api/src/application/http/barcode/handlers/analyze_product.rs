use axum::extract::{Path, State};
use mealadapt_core::domain::barcode::{entities::ProductAnalysis, ports::BarcodeService};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{code}/analyze",
    tag = "barcode",
    summary = "Analyze product",
    description = "Checks a product's ingredients against the family profile. Products without ingredient data return no report and an explanatory note.",
    params(
        ("code" = String, Path, description = "EAN/UPC barcode, 8 to 14 digits"),
    ),
    responses(
        (status = 200, body = ProductAnalysis),
        (status = 404, description = "Product not found"),
        (status = 429, description = "Daily ingredient analysis budget exhausted")
    )
)]
pub async fn analyze_product(
    Path(code): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ProductAnalysis>, ApiError> {
    let analysis = state.service.analyze_product(identity, code).await?;

    Ok(Response::OK(analysis))
}
