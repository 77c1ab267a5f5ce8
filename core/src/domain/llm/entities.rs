use bytes::Bytes;
use thiserror::Error;

use crate::domain::prompt::entities::PromptDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub data: Bytes,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modality {
    Text,
    TextAndImage(ImageInput),
}

/// Everything the invoker needs to issue one logical model call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: PromptDocument,
    pub modality: Modality,
}

impl ModelRequest {
    pub fn text(prompt: PromptDocument) -> Self {
        Self {
            prompt,
            modality: Modality::Text,
        }
    }

    pub fn with_image(prompt: PromptDocument, image: ImageInput) -> Self {
        Self {
            prompt,
            modality: Modality::TextAndImage(image),
        }
    }
}

/// Unvalidated text returned by the provider. Never trusted before it
/// passes through a response validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelOutput(String);

impl RawModelOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failure of a single outbound attempt, before retry classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelCallError {
    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("content blocked by provider: {0}")]
    Blocked(String),

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("could not decode provider envelope: {0}")]
    Decode(String),
}

impl ModelCallError {
    /// Server-side failures and dropped connections may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelCallError::Status { status, .. } => *status >= 500,
            ModelCallError::Network(_) => true,
            _ => false,
        }
    }
}
