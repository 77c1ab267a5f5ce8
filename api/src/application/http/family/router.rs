use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use utoipa::OpenApi;

use super::handlers::{
    add_member::{__path_add_member, add_member},
    delete_member::{__path_delete_member, delete_member},
    get_profile::{__path_get_profile, get_profile},
    replace_profile::{__path_replace_profile, replace_profile},
    update_member::{__path_update_member, update_member},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_profile, replace_profile, add_member, update_member, delete_member))]
pub struct FamilyApiDoc;

pub fn family_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/family/profile", state.args.server.root_path),
            get(get_profile).post(replace_profile),
        )
        .route(
            &format!("{}/api/family/member", state.args.server.root_path),
            post(add_member),
        )
        .route(
            &format!("{}/api/family/member/{{member_id}}", state.args.server.root_path),
            put(update_member).delete(delete_member),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
