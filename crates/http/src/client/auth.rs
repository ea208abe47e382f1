//! Authentication API client methods

use super::{
    error::ClientError,
    typed::{AuthenticatedApiClient, PublicApiClient},
};
use crate::types::{
    AuthResponse, LoginRequest, RefreshResponse, SignupRequest, UserResponse, ValidateResponse,
};
use reqwest::header;

/// Authentication endpoints for the public client
impl PublicApiClient {
    /// Log in with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&request);
        self.execute(req).await
    }

    /// Create an account; the response carries a live session token
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/auth/signup")
            .json(&request);
        self.execute(req).await
    }

    /// Mint a fresh access token. The bearer credential for this call is the
    /// refresh token, not the (possibly expired) access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/auth/refresh")
            .header(header::AUTHORIZATION, format!("Bearer {refresh_token}"));
        self.execute(req).await
    }
}

/// Authentication endpoints for the authenticated client
impl AuthenticatedApiClient {
    /// Ask the server whether the current token is still valid
    pub async fn validate(&self) -> Result<ValidateResponse, ClientError> {
        let req = self.request(reqwest::Method::POST, "/auth/validate");
        self.execute(req).await
    }

    /// Get the current user's record
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let req = self.request(reqwest::Method::GET, "/auth/me");
        self.execute(req).await
    }
}
