//! Feature-level API services

pub mod auth;
pub mod chat;
pub mod tasks;

pub use auth::{AuthService, AuthenticatedUser};
pub use chat::ChatService;
pub use tasks::TaskService;
