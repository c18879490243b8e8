use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::history::types::IdeaInput;

/// What the remote evaluation service reported when a call did not produce
/// a result. Classified by [`crate::kernel::error::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryFailure {
    /// The call observed its cancellation token and stopped.
    #[error("call aborted")]
    Aborted,
    /// The service answered with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },
    /// Network-level failure, no status available.
    #[error("transport error: {0}")]
    Transport(String),
    /// A success status whose body could not be decoded.
    #[error("malformed body: {0}")]
    Malformed(String),
}

/// The remote evaluation service. One operation; the coordinator owns
/// cancellation and only hands a token down.
///
/// Implementations should stop work once `cancel` fires, but the coordinator
/// does not rely on it.
#[async_trait]
pub trait ValidationBoundary: Send + Sync {
    type Output: Send;

    async fn validate(
        &self,
        input: &IdeaInput,
        cancel: CancellationToken,
    ) -> Result<Self::Output, BoundaryFailure>;
}
