use std::time::Duration;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::entities::{ModelCallError, RawModelOutput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter(Duration),
    Stop,
}

/// States of one logical model invocation. `Attempting` carries the
/// zero-based attempt number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationState {
    Attempting(u32),
    Succeeded(RawModelOutput),
    Failed(CoreError),
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(self.multiplier.saturating_pow(attempt))
    }

    pub fn decide(&self, attempt: u32, error: &ModelCallError) -> RetryDecision {
        if error.is_transient() && attempt < self.max_retries {
            RetryDecision::RetryAfter(self.backoff(attempt))
        } else {
            RetryDecision::Stop
        }
    }
}

/// Maps the last attempt's failure onto the error taxonomy once retrying stops.
pub fn classify_failure(error: ModelCallError, attempts: u32) -> CoreError {
    match error {
        ModelCallError::Status { status, message } if status >= 500 => {
            CoreError::ExternalServiceError(format!(
                "model provider returned {} after {} attempts: {}",
                status, attempts, message
            ))
        }
        ModelCallError::Status { status, message } => {
            CoreError::Rejected(format!("provider returned {}: {}", status, message))
        }
        ModelCallError::Blocked(reason) => CoreError::Rejected(reason),
        ModelCallError::Network(message) => CoreError::ExternalServiceError(format!(
            "model provider unreachable after {} attempts: {}",
            attempts, message
        )),
        ModelCallError::EmptyResponse => {
            CoreError::MalformedResponse("model returned no content".to_string())
        }
        ModelCallError::Decode(message) => CoreError::MalformedResponse(message),
    }
}
