// Request-level errors.
//
// Only three things can fail a moderation request: empty input, the overall
// deadline, or an unexpected internal fault. Signal failures never appear
// here; they are absorbed into default signals.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    /// Nothing left after normalization (empty, whitespace, emoji only).
    #[error("Text is empty or contains only emojis.")]
    EmptyInput,

    /// The caller's deadline passed before both signals answered.
    #[error("Moderation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ModerationError {
    /// True for 4xx-class failures the caller can fix.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ModerationError::EmptyInput)
    }

    /// Message safe to show the caller. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ModerationError::EmptyInput | ModerationError::Timeout(_) => self.to_string(),
            ModerationError::Internal(_) => "Failed to process text".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.public_message(),
        }
    }
}

/// Caller-facing error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
