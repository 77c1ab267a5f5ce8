use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    change_password::{__path_change_password, change_password},
    delete_me::{__path_delete_me, delete_me},
    get_me::{__path_get_me, get_me},
    login::{__path_login, login},
    logout::{__path_logout, logout},
    refresh::{__path_refresh, refresh},
    register::{__path_register, register},
    update_me::{__path_update_me, update_me},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    register,
    login,
    refresh,
    logout,
    get_me,
    update_me,
    change_password,
    delete_me
))]
pub struct AuthenticationApiDoc;

pub fn authentication_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/api/auth/register", root_path), post(register))
        .route(&format!("{}/api/auth/login", root_path), post(login))
        .route(&format!("{}/api/auth/refresh", root_path), post(refresh))
        .route(&format!("{}/api/auth/logout", root_path), post(logout))
        .route(
            &format!("{}/api/auth/me", root_path),
            get(get_me).put(update_me).delete(delete_me),
        )
        .route(
            &format!("{}/api/auth/me/password", root_path),
            put(change_password),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
