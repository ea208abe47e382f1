//! Shared API gateway.
//!
//! One place owns the authentication contract for every feature-level call:
//! the current token is attached on the way out, and authentication
//! failures on the way in get a uniform reaction (refresh-then-retry once,
//! then clear the credential and redirect away from protected paths).

use crate::config::SessionConfig;
use crate::navigate::Navigator;
use crate::token_store::TokenStore;
use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tasklink_http::client::{ApiClientBuilder, AuthenticatedApiClient, ClientError, PublicApiClient};
use tracing::{debug, error, warn};

/// Global gateway instance
static GATEWAY: Lazy<Mutex<Option<Arc<ApiGateway>>>> = Lazy::new(|| Mutex::new(None));

/// Install the process-wide gateway instance
pub fn init_gateway(gateway: ApiGateway) -> Arc<ApiGateway> {
    let gateway = Arc::new(gateway);
    let mut lock = GATEWAY.lock().expect("Failed to acquire gateway lock");
    *lock = Some(gateway.clone());
    gateway
}

/// The process-wide gateway instance, if one was installed
pub fn gateway() -> Option<Arc<ApiGateway>> {
    GATEWAY
        .lock()
        .expect("Failed to acquire gateway lock")
        .clone()
}

/// Centralized request augmentation and failure handling
pub struct ApiGateway {
    store: TokenStore,
    config: SessionConfig,
    navigator: Arc<dyn Navigator>,
    current_path: Mutex<String>,
}

impl ApiGateway {
    pub fn new(
        config: SessionConfig,
        store: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            config,
            navigator,
            current_path: Mutex::new("/".to_string()),
        }
    }

    /// The credential store behind this gateway
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// The session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Record the host's current navigation path.
    ///
    /// Redirect-on-auth-failure only fires when this path matches a
    /// protected prefix, so anonymous probe calls from public pages never
    /// cause redirect loops.
    pub fn set_current_path(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.current_path.lock() {
            *current = path.into();
        }
    }

    /// The host's current navigation path
    pub fn current_path(&self) -> String {
        self.current_path
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|_| "/".to_string())
    }

    fn builder(&self) -> ApiClientBuilder {
        let builder = ApiClientBuilder::new().base_url(self.config.base_url.clone());
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(self.config.timeout);
        builder
    }

    /// Client for unauthenticated endpoints
    pub fn public_client(&self) -> Result<PublicApiClient, ClientError> {
        self.builder().build_public()
    }

    /// Client carrying the current token snapshot.
    ///
    /// The token is read once here; concurrent calls each take their own
    /// snapshot and a racing logout is cleaned up by the 401 path on the
    /// next round-trip.
    pub fn authenticated_client(&self) -> Result<AuthenticatedApiClient, ClientError> {
        let token = self.store.read().ok_or_else(|| {
            ClientError::AuthenticationFailed("No authentication token found".to_string())
        })?;
        self.builder().build_authenticated(token)
    }

    /// Run an authenticated call with the inbound failure policy applied.
    ///
    /// On a 401 the gateway attempts one refresh-then-retry; if no refresh
    /// token is stored or the replay is rejected again, the credential is
    /// cleared and, when the current path is protected, the user is
    /// redirected to the login entry point. All other failures are logged
    /// and propagated unchanged; the caller owns user-facing messaging.
    pub async fn execute<T, F, Fut>(&self, call: F) -> Result<T, ClientError>
    where
        F: Fn(AuthenticatedApiClient) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let client = self.authenticated_client()?;
        match call(client).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_auth_expired() => {
                warn!("request rejected with 401, attempting token refresh");
                match self.try_refresh().await {
                    Some(token) => {
                        let retry = self.builder().build_authenticated(token)?;
                        match call(retry).await {
                            Ok(value) => Ok(value),
                            Err(retry_err) => {
                                if retry_err.is_auth_expired() {
                                    self.reject_session();
                                } else {
                                    self.log_failure(&retry_err);
                                }
                                Err(retry_err)
                            }
                        }
                    }
                    None => {
                        self.reject_session();
                        Err(err)
                    }
                }
            }
            Err(err) => {
                self.log_failure(&err);
                Err(err)
            }
        }
    }

    /// Mint a fresh access token from the stored refresh token.
    ///
    /// Returns the new token on success; `None` when no refresh token is
    /// stored or the refresh call fails.
    pub async fn try_refresh(&self) -> Option<String> {
        let refresh_token = self.store.read_refresh()?;
        let client = match self.public_client() {
            Ok(client) => client,
            Err(err) => {
                warn!("cannot build client for token refresh: {err}");
                return None;
            }
        };

        match client.refresh(&refresh_token).await {
            Ok(response) => {
                debug!("token refresh succeeded");
                match response.refresh_token.as_deref() {
                    Some(rotated) => self.store.save(&response.access_token, Some(rotated)),
                    None => self.store.save_access_token(&response.access_token),
                }
                Some(response.access_token)
            }
            Err(err) => {
                warn!("token refresh failed: {err}");
                None
            }
        }
    }

    /// Server said the credential is invalid: clear it and leave any
    /// protected area.
    fn reject_session(&self) {
        self.store.clear();
        let path = self.current_path();
        if self.config.is_protected(&path) {
            warn!("session rejected on protected path {path}, redirecting to login");
            self.navigator.redirect(&self.config.login_path);
        } else {
            debug!("session rejected on {path}, no redirect");
        }
    }

    fn log_failure(&self, err: &ClientError) {
        if err.is_network() {
            warn!("network failure, no response received: {err}");
        } else if err.status().is_some_and(|s| s >= 500) {
            error!("server error: {err}");
        } else if err.is_forbidden() {
            warn!("access forbidden: {err}");
        }
    }
}
