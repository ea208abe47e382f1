//! Tasklink HTTP client
//!
//! Typed clients for the task service's REST interface. The backend is an
//! external collaborator; this crate only speaks its wire contract.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiClientBuilder, AuthenticatedApiClient, PublicApiClient};
