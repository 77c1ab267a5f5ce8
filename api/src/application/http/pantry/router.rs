use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    add_item::{__path_add_item, add_item},
    clear_items::{__path_clear_items, clear_items},
    delete_item::{__path_delete_item, delete_item},
    get_items::{__path_get_items, get_items},
    suggest_recipes::{__path_suggest_recipes, suggest_recipes},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_items, add_item, delete_item, clear_items, suggest_recipes))]
pub struct PantryApiDoc;

pub fn pantry_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/pantry/items", state.args.server.root_path),
            get(get_items).post(add_item).delete(clear_items),
        )
        .route(
            &format!("{}/api/pantry/items/{{item_id}}", state.args.server.root_path),
            delete(delete_item),
        )
        .route(
            &format!("{}/api/pantry/suggest-recipes", state.args.server.root_path),
            post(suggest_recipes),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
