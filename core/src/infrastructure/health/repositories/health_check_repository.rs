use sea_orm::DatabaseConnection;
use tokio::time::Instant;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let started = Instant::now();
        let healthy = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database ping failed: {}", e);
                false
            }
        };

        Ok(DatabaseHealthStatus {
            healthy,
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
