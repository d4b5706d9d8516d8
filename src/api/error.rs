//! API Client Error Types
//!
//! Errors raised while talking to the chatbot backend.

use thiserror::Error;

/// Errors that can occur when calling the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// Backend unreachable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the backend
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message supplied by the server, if the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to show a user, falling back to `fallback`
    pub fn display_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// HTTP status, for failures that got as far as a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable(err.to_string())
        } else {
            ClientError::Request(err)
        }
    }
}

/// Result type for backend calls
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_fallback() {
        let err = ClientError::Api { status: 400, detail: Some("Email already registered".into()) };
        assert_eq!(err.display_message("Signup failed"), "Email already registered");

        let bare = ClientError::Api { status: 500, detail: None };
        assert_eq!(bare.display_message("Signup failed"), "Signup failed");
        assert_eq!(ClientError::Timeout.display_message("x"), "x");
    }

    #[test]
    fn test_auth_failure() {
        assert!(ClientError::Api { status: 401, detail: None }.is_auth_failure());
        assert!(!ClientError::Api { status: 500, detail: None }.is_auth_failure());
        assert!(!ClientError::Timeout.is_auth_failure());
    }

    #[test]
    fn test_display() {
        let err = ClientError::Api {
            status: 401,
            detail: Some("Invalid email or password".into()),
        };
        assert_eq!(err.to_string(), "API error 401: Invalid email or password");
    }
}
