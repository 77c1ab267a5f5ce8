use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_product::{__path_analyze_product, analyze_product},
    lookup_product::{__path_lookup_product, lookup_product},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(lookup_product, analyze_product))]
pub struct BarcodeApiDoc;

pub fn barcode_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/barcode/{{code}}", state.args.server.root_path),
            get(lookup_product),
        )
        .route(
            &format!("{}/api/barcode/{{code}}/analyze", state.args.server.root_path),
            post(analyze_product),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
