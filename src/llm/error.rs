//! LLM error types

use std::time::Duration;

use thiserror::Error;

use crate::error::FaultKind;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    /// Faults raised by the service for the call itself are `RemoteCall`;
    /// problems with what came back are `Unexpected`.
    pub fn kind(&self) -> FaultKind {
        match self {
            LlmError::RateLimited { .. } | LlmError::ApiError { .. } | LlmError::Network(_) => FaultKind::RemoteCall,
            LlmError::InvalidResponse(_) | LlmError::Blocked(_) | LlmError::EmptyResponse | LlmError::Json(_) => {
                FaultKind::Unexpected
            }
        }
    }

    /// Get the retry duration if this is a rate limit error
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
