use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Model call timed out")]
    Timeout,

    #[error("Model rejected the request: {0}")]
    Rejected(String),

    #[error("Rate limit exceeded for {endpoint}: {limit} calls per window")]
    RateLimited {
        endpoint: String,
        limit: u32,
        retry_after_secs: u64,
    },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Incomplete verdict: {0}")]
    IncompleteVerdict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
