use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    add_meal::{__path_add_meal, add_meal},
    delete_meal::{__path_delete_meal, delete_meal},
    generate_shopping::{__path_generate_shopping, generate_shopping},
    get_week::{__path_get_week, get_week},
    update_meal::{__path_update_meal, update_meal},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_week, add_meal, update_meal, delete_meal, generate_shopping))]
pub struct MealPlanApiDoc;

pub fn meal_plan_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/api/meal-plans", root_path), get(get_week))
        .route(&format!("{}/api/meal-plans/meals", root_path), post(add_meal))
        .route(
            &format!("{}/api/meal-plans/meals/{{meal_id}}", root_path),
            put(update_meal).delete(delete_meal),
        )
        .route(
            &format!("{}/api/meal-plans/{{plan_id}}/generate-shopping", root_path),
            post(generate_shopping),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
