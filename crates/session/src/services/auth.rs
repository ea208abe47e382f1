//! Authentication API service

use crate::gateway::ApiGateway;
use std::sync::Arc;
use tasklink_core::{User, decode_claims};
use tasklink_http::client::ClientError;
use tasklink_http::types::{AuthResponse, LoginRequest, SignupRequest, ValidateResponse};
use tracing::{debug, info, warn};

/// A user together with the credential minted for them
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Authentication API service
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<ApiGateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Log in with email and password.
    ///
    /// Any previous credential is cleared first so a failed attempt cannot
    /// leave a stale session behind. On success the token (and refresh
    /// token, when issued) is persisted before returning.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, ClientError> {
        self.logout();

        let client = self.gateway.public_client()?;
        let response = client
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        info!("login succeeded");
        Ok(self.adopt_credential(response, email))
    }

    /// Create an account. The response carries a live session, adopted the
    /// same way as a login.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthenticatedUser, ClientError> {
        self.logout();

        let client = self.gateway.public_client()?;
        let response = client
            .signup(SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.map(String::from),
            })
            .await?;

        info!("signup succeeded");
        Ok(self.adopt_credential(response, email))
    }

    fn adopt_credential(&self, response: AuthResponse, email: &str) -> AuthenticatedUser {
        let store = self.gateway.store();
        store.save(&response.token, response.refresh_token.as_deref());

        // Prefer the token's own claims; some service versions issue opaque
        // tokens and carry the user record in the response body instead.
        let user = match decode_claims(&response.token) {
            Ok(claims) => User::from_claims(&claims),
            Err(_) => response
                .user
                .map(|u| User {
                    id: u.user_id,
                    email: u.email.unwrap_or_else(|| email.to_string()),
                    name: u.name,
                })
                .unwrap_or_else(|| User {
                    id: String::new(),
                    email: email.to_string(),
                    name: None,
                }),
        };

        AuthenticatedUser {
            user,
            token: response.token,
        }
    }

    /// Drop the credential and any chat conversation state. Idempotent.
    pub fn logout(&self) {
        let store = self.gateway.store();
        store.clear();
        store.clear_conversation_id();
        debug!("credential cleared");
    }

    /// The current user, if a live session exists
    pub fn current_user(&self) -> Option<User> {
        self.gateway.store().current_session().map(|s| s.user)
    }

    /// Whether a live (present and unexpired) session exists
    pub fn is_authenticated(&self) -> bool {
        self.gateway.store().current_session().is_some()
    }

    /// Whether the stored token is inside the configured expiring-soon
    /// window. An absent or undecodable token counts as expiring.
    pub fn is_expiring_soon(&self) -> bool {
        let store = self.gateway.store();
        match store.read() {
            Some(token) => {
                store.is_expiring_soon(&token, self.gateway.config().expiry_threshold_secs)
            }
            None => true,
        }
    }

    /// Ask the server whether the current token is valid.
    ///
    /// Never raises: an absent token short-circuits locally and a failed
    /// round-trip degrades to an invalid result carrying the error text.
    /// Redirect decisions stay with the gateway's 401 policy.
    pub async fn validate(&self) -> ValidateResponse {
        if self.gateway.store().read().is_none() {
            debug!("validate: no token stored");
            return ValidateResponse::invalid("No token found");
        }

        match self.gateway.execute(|client| async move { client.validate().await }).await {
            Ok(response) => response,
            Err(err) => {
                warn!("token validation failed: {err}");
                ValidateResponse::invalid(err.to_string())
            }
        }
    }

    /// Manually mint a fresh access token from the stored refresh token.
    ///
    /// Returns `None` when no refresh token is stored. A failed refresh
    /// clears the credential (the session is not recoverable) and yields
    /// `None` as well; the next protected call handles navigation.
    pub async fn refresh(&self) -> Option<String> {
        if self.gateway.store().read_refresh().is_none() {
            warn!("refresh requested without a stored refresh token");
            return None;
        }

        match self.gateway.try_refresh().await {
            Some(token) => Some(token),
            None => {
                self.logout();
                None
            }
        }
    }

    /// Fetch the current user's record from the server
    pub async fn me(&self) -> Result<tasklink_http::types::UserResponse, ClientError> {
        self.gateway.execute(|client| async move { client.me().await }).await
    }
}
