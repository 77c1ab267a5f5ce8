use axum::{Router, routing::get};

use super::handlers::health_check::health_check;
use crate::application::http::server::app_state::AppState;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/health", root_path), get(health_check))
}
