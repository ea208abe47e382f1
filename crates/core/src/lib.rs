//! Tasklink core types and utilities

pub mod claims;
pub mod error;
pub mod storage;
pub mod types;

pub use claims::{DecodeError, decode_claims};
pub use error::{CoreError, CoreResult, ErrorContext};
pub use storage::{CredentialStorage, MemoryStorage};
pub use types::{Claims, Session, Tag, TaskPriority, TaskRecord, User};
