use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::history::types::IdeaInput;
use crate::services::validator::boundary::{BoundaryFailure, ValidationBoundary};
use crate::services::validator::types::ValidationResult;

/// HTTP client for the evaluation endpoint.
///
/// No request timeout: a hung call is resolved by cancelling its token.
#[derive(Clone)]
pub struct HttpValidator {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl HttpValidator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, input: &IdeaInput) -> Result<ValidationResult, BoundaryFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(input)
            .send()
            .await
            .map_err(|e| BoundaryFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // body is best effort; a failed read still leaves the status
            let body = response.text().await.unwrap_or_default();
            warn!("Evaluation service returned {}", status);
            return Err(failure_from_status(status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BoundaryFailure::Transport(e.to_string()))?;
        serde_json::from_slice::<ValidationResult>(&bytes).map_err(|e| BoundaryFailure::Malformed(e.to_string()))
    }
}

/// Longest plain-text body still treated as a message rather than a page.
const MAX_PLAIN_MESSAGE: usize = 200;

/// Maps a non-success response to a failure, lifting `error` or `message`
/// out of a JSON body. A short non-JSON, non-markup body is taken as the
/// message itself.
pub fn failure_from_status(status: u16, body: &str) -> BoundaryFailure {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::from_value::<ErrorBody>(value)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .map(|m| m.trim().to_string()),
        Err(_) => plain_message(body),
    }
    .filter(|m| !m.is_empty());

    BoundaryFailure::Status { status, message }
}

fn plain_message(body: &str) -> Option<String> {
    let text = body.trim();
    if text.starts_with('<') || text.chars().count() > MAX_PLAIN_MESSAGE {
        return None;
    }
    Some(text.to_string())
}

#[async_trait]
impl ValidationBoundary for HttpValidator {
    type Output = ValidationResult;

    async fn validate(
        &self,
        input: &IdeaInput,
        cancel: CancellationToken,
    ) -> Result<ValidationResult, BoundaryFailure> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BoundaryFailure::Aborted),
            res = self.post(input) => res,
        }
    }
}
