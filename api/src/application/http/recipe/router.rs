use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_recipe::{__path_analyze_recipe, analyze_recipe};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(analyze_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/recipe/analyze", state.args.server.root_path),
            post(analyze_recipe),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
