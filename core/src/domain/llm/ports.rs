use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    llm::{
        entities::{ImageInput, ModelCallError},
        rate_limit::{EndpointClass, EndpointUsage},
    },
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
        temperature: f32,
    ) -> impl Future<Output = Result<String, ModelCallError>> + Send;

    fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        response_schema: serde_json::Value,
        temperature: f32,
    ) -> impl Future<Output = Result<String, ModelCallError>> + Send;
}

/// Per-user, per-endpoint-class call budget. `try_acquire` records the call
/// when it is admitted and fails with `CoreError::RateLimited` otherwise.
#[cfg_attr(test, mockall::automock)]
pub trait RateLimiter: Send + Sync {
    fn try_acquire(
        &self,
        user_id: Uuid,
        endpoint: EndpointClass,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn usage(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<EndpointUsage>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UsageService: Send + Sync {
    fn get_usage(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<EndpointUsage>, CoreError>> + Send;
}
