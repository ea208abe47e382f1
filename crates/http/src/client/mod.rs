//! Tasklink HTTP client

pub mod auth;
pub mod chat;
pub mod error;
pub mod tasks;
pub mod typed;

pub use error::ClientError;
pub use typed::{ApiClientBuilder, AuthenticatedApiClient, DEFAULT_TIMEOUT, PublicApiClient};
