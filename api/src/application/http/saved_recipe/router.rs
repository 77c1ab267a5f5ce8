use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    delete_saved_recipe::{__path_delete_saved_recipe, delete_saved_recipe},
    get_saved_recipe::{__path_get_saved_recipe, get_saved_recipe},
    get_saved_recipes::{__path_get_saved_recipes, get_saved_recipes},
    save_recipe::{__path_save_recipe, save_recipe},
    update_saved_recipe::{__path_update_saved_recipe, update_saved_recipe},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    save_recipe,
    get_saved_recipes,
    get_saved_recipe,
    update_saved_recipe,
    delete_saved_recipe
))]
pub struct SavedRecipeApiDoc;

pub fn saved_recipe_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/recipes/saved", state.args.server.root_path),
            get(get_saved_recipes).post(save_recipe),
        )
        .route(
            &format!("{}/api/recipes/saved/{{recipe_id}}", state.args.server.root_path),
            get(get_saved_recipe)
                .put(update_saved_recipe)
                .delete(delete_saved_recipe),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
