//! Error types for the JupyterHub client.

use thiserror::Error;

/// Errors that can occur when talking to the JupyterHub API.
#[derive(Debug, Clone, Error)]
pub enum JupyterHubError {
    /// The client could not be built from the given settings.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The request failed before a response was received.
    #[error("request failed: {0}")]
    Transport(String),

    /// The hub answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl JupyterHubError {
    /// Create an `InvalidConfig` error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a `Transport` error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a `Status` error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}
