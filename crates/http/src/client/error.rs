//! Client error types

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server rejected the credential (401)
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::AuthenticationFailed(_) => true,
            Self::ServerError { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Whether the server refused access to the resource (403)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Whether the failure happened before any response was received
    pub fn is_network(&self) -> bool {
        match self {
            Self::Request(err) => err.status().is_none(),
            _ => false,
        }
    }

    /// The response status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::ServerError { status, .. } => Some(*status),
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Extract a human-readable message from an error response body.
    ///
    /// The service reports failures as structured bodies carrying a `detail`
    /// or `message` field; plain-text bodies are passed through and an empty
    /// body degrades to the status line.
    pub fn message_from_body(status: reqwest::StatusCode, body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            for field in ["detail", "message"] {
                if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                    return text.to_string();
                }
            }
        }
        if body.trim().is_empty() {
            status.to_string()
        } else {
            body.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_statuses_to_variants() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "no".into()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, "no".into()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ClientError::ServerError { status: 500, .. }
        ));
    }

    #[test]
    fn auth_expired_only_for_401() {
        assert!(ClientError::AuthenticationFailed("x".into()).is_auth_expired());
        assert!(!ClientError::Forbidden("x".into()).is_auth_expired());
        assert!(
            !ClientError::ServerError {
                status: 500,
                message: "x".into()
            }
            .is_auth_expired()
        );
    }

    #[test]
    fn extracts_structured_messages() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            ClientError::message_from_body(status, r#"{"detail": "Login failed"}"#),
            "Login failed"
        );
        assert_eq!(
            ClientError::message_from_body(status, r#"{"message": "Invalid email"}"#),
            "Invalid email"
        );
        assert_eq!(
            ClientError::message_from_body(status, "plain text"),
            "plain text"
        );
        assert_eq!(
            ClientError::message_from_body(status, ""),
            status.to_string()
        );
    }
}
