use serde::{Serialize, de::DeserializeOwned};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

pub fn to_json<T: Serialize>(value: &T, column: &str) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to encode {} column: {}", column, e);
        CoreError::InternalServerError
    })
}

pub fn from_json<T: DeserializeOwned>(
    value: serde_json::Value,
    column: &str,
) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        error!("Stored {} column is not readable: {}", column, e);
        CoreError::InternalServerError
    })
}
