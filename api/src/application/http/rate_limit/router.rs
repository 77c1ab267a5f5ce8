use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_usage::{__path_get_usage, get_usage};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_usage))]
pub struct RateLimitApiDoc;

pub fn rate_limit_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/rate-limits/usage", state.args.server.root_path),
            get(get_usage),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
