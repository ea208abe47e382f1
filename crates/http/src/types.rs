//! Wire types for the task service's REST contract

use serde::{Deserialize, Serialize};
use tasklink_core::TaskRecord;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// Optional display name for the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// User record as carried in auth responses and `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User identifier (some service versions emit `id` instead)
    #[serde(alias = "id")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Successful login/signup response carrying the minted credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the new session
    pub token: String,
    /// Secondary token for minting a fresh bearer token, when issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Server-side token validation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry as a Unix timestamp, seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateResponse {
    /// An invalid result produced locally, without a round-trip
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            user_id: String::new(),
            email: None,
            expires_at: None,
            error: Some(error.into()),
        }
    }
}

/// Token refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Replacement bearer token
    pub access_token: String,
    /// Rotated refresh token, when the server rotates them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Task creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<tasklink_core::TaskPriority>,
    /// ISO 8601 due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

/// Task update request; absent fields are left unchanged by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<tasklink_core::TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

/// Task list response.
///
/// Service versions disagree on the envelope: some return a bare array,
/// some wrap it in `tasks`, some wrap that again in `data`. All shapes
/// normalize to the same ordered sequence via [`TaskListResponse::into_tasks`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskListResponse {
    Tasks { tasks: Vec<TaskRecord> },
    Data { data: TaskListEnvelope },
    Plain(Vec<TaskRecord>),
}

/// Inner envelope of a `data`-wrapped task list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskListEnvelope {
    Tasks { tasks: Vec<TaskRecord> },
    Plain(Vec<TaskRecord>),
}

impl TaskListResponse {
    /// Normalize any envelope shape to the ordered task sequence
    pub fn into_tasks(self) -> Vec<TaskRecord> {
        match self {
            Self::Tasks { tasks } => tasks,
            Self::Data { data } => match data {
                TaskListEnvelope::Tasks { tasks } => tasks,
                TaskListEnvelope::Plain(tasks) => tasks,
            },
            Self::Plain(tasks) => tasks,
        }
    }
}

/// Chat message request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text message forwarded to the assistant
    pub message: String,
    /// Conversation to continue; omitted on the first message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Chat message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply text
    pub response: String,
    /// Conversation id to carry into the next message
    pub conversation_id: String,
}
