//! Client error types

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received (connectivity failure or timeout)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Authorization failed and could not be recovered via token refresh
    #[error("session expired")]
    AuthExpired,

    /// Server returned a non-success status outside the refresh protocol
    #[error("server error {status}: {body}")]
    Http { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Consume a non-success response into an [`ClientError::Http`] value.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::Http { status, body }
    }

    /// Whether the caller should prompt for a fresh login.
    #[must_use]
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}
