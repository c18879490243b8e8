use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::validator::boundary::BoundaryFailure;

/// Classified outcome of a failed validation. This is all the presentation
/// layer ever sees; raw transport errors stop at the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Superseded by a newer submission or explicitly cancelled.
    #[error("request cancelled")]
    Cancelled,
    #[error("rate limited by the evaluation service")]
    RateLimited,
    #[error("evaluation service fault (HTTP {status})")]
    ServerFault { status: u16 },
    #[error("request rejected (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    ClientFault { status: u16, message: Option<String> },
    #[error("validation failed: {detail}")]
    Unknown { detail: String },
}

/// Content-free discriminant, safe for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Cancelled,
    RateLimited,
    ServerFault,
    ClientFault,
    Unknown,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Cancelled => ErrorKind::Cancelled,
            ValidationError::RateLimited => ErrorKind::RateLimited,
            ValidationError::ServerFault { .. } => ErrorKind::ServerFault,
            ValidationError::ClientFault { .. } => ErrorKind::ClientFault,
            ValidationError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ValidationError::Cancelled)
    }

    /// Text for display next to the input form.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::Cancelled => "Request cancelled.".to_string(),
            ValidationError::RateLimited => {
                "You are sending too many requests too quickly. Give it a minute and try again.".to_string()
            }
            ValidationError::ServerFault { .. } => "Server error. Try again in a moment.".to_string(),
            ValidationError::ClientFault { message, .. } => match message.as_deref() {
                Some(m) if !m.trim().is_empty() => m.to_string(),
                _ => "Request failed.".to_string(),
            },
            ValidationError::Unknown { .. } => {
                "The analysis failed. Try refining your pitch and running it again.".to_string()
            }
        }
    }
}

/// Pure mapping from what the boundary reported to the taxonomy. No retries.
pub fn classify(failure: BoundaryFailure) -> ValidationError {
    match failure {
        BoundaryFailure::Aborted => ValidationError::Cancelled,
        BoundaryFailure::Status { status: 429, .. } => ValidationError::RateLimited,
        BoundaryFailure::Status { status, .. } if (500..=599).contains(&status) => {
            ValidationError::ServerFault { status }
        }
        BoundaryFailure::Status { status, message } => ValidationError::ClientFault { status, message },
        BoundaryFailure::Transport(detail) => ValidationError::Unknown { detail },
        BoundaryFailure::Malformed(detail) => ValidationError::Unknown {
            detail: format!("malformed response: {}", detail),
        },
    }
}
