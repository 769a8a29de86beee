//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response received (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The fixed request timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response carrying a server message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record id that cannot be addressed as a path segment
    #[error("Invalid record id: {0:?}")]
    InvalidId(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Image host rejected the upload
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Session store I/O
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Http(err)
        }
    }
}

impl ClientError {
    /// Message suitable for a banner or toast.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Unable to reach the server. Check your connection.".into(),
            ClientError::Timeout => "The server took too long to respond.".into(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Unauthorized => "Please sign in again.".into(),
            ClientError::NotFound(message) => message.clone(),
            ClientError::InvalidId(id) => format!("\"{id}\" is not a valid employee id."),
            ClientError::InvalidResponse(_) => "The server sent an unexpected response.".into(),
            ClientError::Upload(message) => format!("Image upload failed: {message}"),
            ClientError::Io(_) | ClientError::Serialization(_) => self.to_string(),
        }
    }

    /// True for failures where no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Timeout)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_server_text() {
        let err = ClientError::Api {
            status: 409,
            message: "Email already exists".into(),
        };
        assert_eq!(err.user_message(), "Email already exists");
        assert!(!err.is_network());
        assert!(ClientError::Timeout.is_network());
    }

    #[test]
    fn test_not_found_shows_server_message_verbatim() {
        let err = ClientError::NotFound("Employee not found".into());
        assert_eq!(err.user_message(), "Employee not found");
    }
}
