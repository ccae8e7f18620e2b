//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response. `message` is the body's `message` field when the
    /// backend provided one.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The session cookie is missing or expired.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::HttpError { message, .. } if !message.is_empty() => message.clone(),
            FetchError::HttpError { status, .. } => format!("Request failed ({})", status),
            FetchError::Timeout => "The server took too long to respond".to_string(),
            FetchError::RequestError(_) | FetchError::InvalidUrl(_) => {
                "Unable to reach the server".to_string()
            }
            FetchError::ParseError(_) | FetchError::JsonError(_) => {
                "Unexpected response from the server".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
