use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_ingredients::{__path_analyze_ingredients, analyze_ingredients},
    analyze_label::{__path_analyze_label, analyze_label},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(analyze_label, analyze_ingredients))]
pub struct ScanApiDoc;

pub fn scan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/scan/analyze", state.args.server.root_path),
            post(analyze_label),
        )
        .route(
            &format!("{}/api/scan/ingredients", state.args.server.root_path),
            post(analyze_ingredients),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
