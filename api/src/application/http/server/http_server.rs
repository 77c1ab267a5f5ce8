use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, RETRY_AFTER};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use mealadapt_core::{application::create_service, domain::common::MealAdaptConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::authentication::router::authentication_routes;
use crate::application::http::barcode::router::barcode_routes;
use crate::application::http::family::router::family_routes;
use crate::application::http::health::router::health_routes;
use crate::application::http::meal_plan::router::meal_plan_routes;
use crate::application::http::pantry::router::pantry_routes;
use crate::application::http::rate_limit::router::rate_limit_routes;
use crate::application::http::recipe::router::recipe_routes;
use crate::application::http::saved_recipe::router::saved_recipe_routes;
use crate::application::http::scan::router::scan_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::application::http::shopping::router::shopping_routes;
use crate::args::Args;

/// Multipart label photos may be up to 10 MB; leave room for the form envelope.
const MAX_BODY_SIZE: usize = 11 * 1024 * 1024;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = MealAdaptConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect()
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = allowed_origins(&state.args.server.allowed_origins);
    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .expose_headers([RETRY_AFTER])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(authentication_routes(state.clone()))
        .merge(family_routes(state.clone()))
        .merge(recipe_routes(state.clone()))
        .merge(scan_routes(state.clone()))
        .merge(pantry_routes(state.clone()))
        .merge(saved_recipe_routes(state.clone()))
        .merge(shopping_routes(state.clone()))
        .merge(meal_plan_routes(state.clone()))
        .merge(barcode_routes(state.clone()))
        .merge(rate_limit_routes(state.clone()))
        .merge(health_routes(&root_path))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_origins_are_skipped() {
        let origins = allowed_origins(&[
            "http://localhost:5173".to_string(),
            "bad\norigin".to_string(),
        ]);

        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:5173")]);
    }
}
