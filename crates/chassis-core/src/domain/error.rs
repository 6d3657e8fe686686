//! Client Errors

use thiserror::Error;

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Shown when a listing or detail fetch fails
pub const FETCH_FAILED: &str = "Failed to get data";
/// Shown when a search request fails
pub const SEARCH_FAILED: &str = "Failed to search data";
/// Login refused without a server message
pub const LOGIN_FAILED: &str = "Wrong username or password";
/// Any transport failure on the login screen
pub const CONNECT_FAILED: &str = "Unable to connect to the server";
/// Report generation succeeded without a file
pub const PDF_NOT_AVAILABLE: &str = "PDF not available";
pub const PDF_FAILED: &str = "Failed to generate PDF";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// No bearer token is stored
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response, with the backend's `message` when it sent one
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The backend refused the request (bad credentials, duplicate user, ...)
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Message sent by the backend, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            ClientError::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let status = ClientError::Status { status: 400, message: Some("Username \"bob\" is already taken".into()) };
        assert_eq!(status.server_message(), Some("Username \"bob\" is already taken"));
        assert_eq!(ClientError::Rejected("nope".into()).server_message(), Some("nope"));
        assert_eq!(ClientError::Unauthenticated.server_message(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ClientError::Status { status: 500, message: None }.to_string(), "HTTP 500");
        assert_eq!(ClientError::Rejected("Wrong username or password".into()).to_string(), "Wrong username or password");
    }
}
