use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use mealadapt_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub detail: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Rejected(String),
    #[error("{detail}")]
    RateLimited { detail: String, retry_after_secs: u64 },
    #[error("{0}")]
    MalformedResponse(String),
    #[error("{0}")]
    IncompleteVerdict(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Rejected(_) => (StatusCode::UNPROCESSABLE_ENTITY, "rejected"),
            ApiError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            ApiError::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "malformed_response"),
            ApiError::IncompleteVerdict(_) => (StatusCode::BAD_GATEWAY, "incomplete_verdict"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
            }
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

fn format_cooldown(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600).div_ceil(60);
    match (hours, minutes) {
        (0, m) => format!("{} minute(s)", m.max(1)),
        (h, 0) => format!("{} hour(s)", h),
        (h, m) => format!("{} hour(s) {} minute(s)", h, m),
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ValidationError(detail) => ApiError::ValidationError(detail),
            CoreError::Invalid(detail) => ApiError::BadRequest(detail),
            CoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            CoreError::Conflict(detail) => ApiError::Conflict(detail),
            CoreError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect email or password".to_string())
            }
            CoreError::InvalidToken => {
                ApiError::Unauthorized("Invalid authentication token".to_string())
            }
            CoreError::TokenExpired => {
                ApiError::Unauthorized("Authentication token has expired".to_string())
            }
            CoreError::Rejected(_) => ApiError::Rejected(
                "The AI service declined this request. Try rephrasing it or using a different input."
                    .to_string(),
            ),
            CoreError::RateLimited {
                endpoint,
                limit,
                retry_after_secs,
            } => ApiError::RateLimited {
                detail: format!(
                    "You have used all {} {} requests for now. Try again in {}.",
                    limit,
                    endpoint.replace('_', " "),
                    format_cooldown(retry_after_secs)
                ),
                retry_after_secs,
            },
            CoreError::MalformedResponse(_) => ApiError::MalformedResponse(
                "The AI service returned an answer we could not read. Please try again.".to_string(),
            ),
            CoreError::IncompleteVerdict(_) => ApiError::IncompleteVerdict(
                "The AI service did not return a verdict for every family member. Please try again."
                    .to_string(),
            ),
            CoreError::ExternalServiceError(_) => ApiError::ServiceUnavailable(
                "An upstream service is temporarily unavailable. Please try again shortly."
                    .to_string(),
            ),
            CoreError::Timeout => ApiError::Timeout(
                "The request took too long to complete. Please try again.".to_string(),
            ),
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(code, "{}", self);
        }

        let retry_after = match &self {
            ApiError::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        };

        let body = ApiErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// `Json<T>` that also runs `validator` rules before the handler sees the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::ValidationError(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string().replace('\n', "; ")))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, Option<HeaderValue>, ApiErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let retry_after = response.headers().get(RETRY_AFTER).cloned();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, retry_after, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let error = ApiError::from(CoreError::RateLimited {
            endpoint: "analyze_recipe".to_string(),
            limit: 50,
            retry_after_secs: 5400,
        });

        let (status, retry_after, body) = render(error).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(retry_after, Some(HeaderValue::from(5400u64)));
        assert_eq!(body.code, "rate_limited");
        assert!(body.detail.contains("1 hour(s) 30 minute(s)"));
    }

    #[tokio::test]
    async fn test_malformed_output_is_bad_gateway_with_detail() {
        let (status, _, body) =
            render(CoreError::MalformedResponse("eof".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "malformed_response");
        assert!(!body.detail.is_empty());
        assert!(!body.detail.contains("eof"));
    }

    #[tokio::test]
    async fn test_model_failures_have_distinct_codes() {
        let cases = [
            (CoreError::Timeout, StatusCode::GATEWAY_TIMEOUT, "timeout"),
            (
                CoreError::Rejected("SAFETY".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "rejected",
            ),
            (
                CoreError::IncompleteVerdict("missing".to_string()),
                StatusCode::BAD_GATEWAY,
                "incomplete_verdict",
            ),
            (
                CoreError::ExternalServiceError("503".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
                "upstream_unavailable",
            ),
        ];

        for (core, expected_status, expected_code) in cases {
            let (status, _, body) = render(core.into()).await;
            assert_eq!(status, expected_status);
            assert_eq!(body.code, expected_code);
        }
    }

    #[tokio::test]
    async fn test_validation_error_keeps_message() {
        let (status, _, body) =
            render(CoreError::ValidationError("unknown member".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.detail, "unknown member");
    }

    #[test]
    fn test_cooldown_formatting() {
        assert_eq!(format_cooldown(30), "1 minute(s)");
        assert_eq!(format_cooldown(7200), "2 hour(s)");
    }
}
