//! Session configuration

use std::time::Duration;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "jwt_token";

/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Storage key for the chat conversation id
pub const CONVERSATION_KEY: &str = "chat_conversation_id";

/// Session configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Base URL of the task service
    pub base_url: String,
    /// Where auth failures on protected paths redirect to
    pub login_path: String,
    /// Path prefixes that require a valid session
    pub protected_paths: Vec<String>,
    /// Threshold for "expiring soon" checks, in seconds
    pub expiry_threshold_secs: i64,
    /// Per-request upper bound (native targets only)
    pub timeout: Duration,
}

impl SessionConfig {
    /// Configuration with the default paths and thresholds
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: "/login".to_string(),
            protected_paths: vec![
                "/dashboard".to_string(),
                "/tasks".to_string(),
                "/profile".to_string(),
            ],
            expiry_threshold_secs: 300,
            timeout: tasklink_http::client::DEFAULT_TIMEOUT,
        }
    }

    /// Replace the protected path prefixes
    pub fn with_protected_paths(mut self, paths: Vec<String>) -> Self {
        self.protected_paths = paths;
        self
    }

    /// Replace the login entry point
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `path` requires a valid session
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_protected_prefixes_match() {
        let config = SessionConfig::new("http://localhost:8000");
        assert!(config.is_protected("/dashboard"));
        assert!(config.is_protected("/tasks/t1"));
        assert!(config.is_protected("/profile"));
        assert!(!config.is_protected("/"));
        assert!(!config.is_protected("/login"));
        assert!(!config.is_protected("/about"));
    }
}
