use axum::{Json, extract::State, http::StatusCode};
use mealadapt_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub database: Option<DatabaseHealthStatus>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check",
    description = "Liveness plus a database ping",
    responses(
        (status = 200, body = HealthResponse, description = "Service and database are up"),
        (status = 503, body = HealthResponse, description = "Database unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.service.readiness().await {
        Ok(database) if database.healthy => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                database: Some(database),
            }),
        ),
        Ok(database) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
                database: Some(database),
            }),
        ),
        Err(e) => {
            warn!("database readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    database: None,
                }),
            )
        }
    }
}
