use thiserror::Error;

use super::{ApiError, ConfigError};

/// Top-level error for all client operations.
#[derive(Debug, Error)]
pub enum WarrantError {
    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response (connection, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A query expression was rendered before it was complete.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A success body was valid JSON but not what the operation promised.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl WarrantError {
    /// Returns the classified API error, if that is what this is.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
