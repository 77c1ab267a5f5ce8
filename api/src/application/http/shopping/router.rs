use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    add_item::{__path_add_item, add_item},
    complete_list::{__path_complete_list, complete_list},
    create_list::{__path_create_list, create_list},
    delete_item::{__path_delete_item, delete_item},
    delete_list::{__path_delete_list, delete_list},
    generate_list::{__path_generate_list, generate_list},
    get_list::{__path_get_list, get_list},
    get_lists::{__path_get_lists, get_lists},
    update_item::{__path_update_item, update_item},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    create_list,
    generate_list,
    get_lists,
    get_list,
    delete_list,
    complete_list,
    add_item,
    update_item,
    delete_item
))]
pub struct ShoppingApiDoc;

pub fn shopping_routes(state: AppState) -> Router<AppState> {
    let root_path = state.args.server.root_path.clone();

    Router::new()
        .route(
            &format!("{}/api/shopping/lists", root_path),
            get(get_lists).post(create_list),
        )
        .route(
            &format!("{}/api/shopping/lists/generate", root_path),
            post(generate_list),
        )
        .route(
            &format!("{}/api/shopping/lists/{{list_id}}", root_path),
            get(get_list).delete(delete_list),
        )
        .route(
            &format!("{}/api/shopping/lists/{{list_id}}/items", root_path),
            post(add_item),
        )
        .route(
            &format!("{}/api/shopping/lists/{{list_id}}/complete", root_path),
            post(complete_list),
        )
        .route(
            &format!("{}/api/shopping/items/{{item_id}}", root_path),
            put(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(state, auth))
}
