use serde::Deserialize;
use thiserror::Error;

/// Errors from Asana API operations.
#[derive(Debug, Error)]
pub enum AsanaError {
    /// Network request failed before a response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Asana returned an error response.
    #[error("asana error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AsanaError {
    /// True when the remote rejected the request with a 4xx status,
    /// typically an invalid or expired token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == 401 || *status == 403)
    }
}

/// Result type for Asana client operations.
pub type AsanaResult<T> = Result<T, AsanaError>;

/// Asana error response payload: `{"errors": [{"message": "..."}]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Builds an [`AsanaError::Api`] from a non-success response body,
/// pulling the first upstream message out when the body parses.
pub(crate) fn api_error(status: u16, body: &str) -> AsanaError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors[0].message.clone(),
        _ => body.to_string(),
    };
    AsanaError::Api { status, message }
}
