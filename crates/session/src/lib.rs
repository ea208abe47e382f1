//! Tasklink session layer
//!
//! Owns the credential lifecycle on the client side: a [`TokenStore`] as the
//! single source of truth for the persisted bearer token, and an
//! [`ApiGateway`] that attaches it to every outbound request and reacts
//! uniformly to authentication failures. Feature services (auth, tasks,
//! chat) sit on top so UI code never touches raw storage keys or headers.

pub mod config;
pub mod gateway;
pub mod navigate;
pub mod services;
pub mod token_store;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::SessionConfig;
pub use gateway::{ApiGateway, gateway, init_gateway};
pub use navigate::{Navigator, NoopNavigator, RecordingNavigator};
pub use services::{AuthService, ChatService, TaskService};
pub use token_store::TokenStore;
