use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority levels understood by the task service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A tag attached to a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub user_id: String,
}

/// A task record as returned by the task service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An authenticated user as seen by the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl User {
    /// Build a user from decoded token claims.
    ///
    /// Falls back to the local part of the email address when the token
    /// carries no display name.
    pub fn from_claims(claims: &Claims) -> Self {
        let name = claims.name.clone().or_else(|| {
            claims
                .email
                .as_ref()
                .and_then(|e| e.split('@').next())
                .map(|s| s.to_string())
        });
        Self {
            id: claims.subject().to_string(),
            email: claims.email.clone().unwrap_or_default(),
            name,
        }
    }

    /// Display name, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Claim set decoded from a bearer token payload.
///
/// The service sets either `user_id` or the standard `sub` depending on the
/// token issuer version, so both are kept and [`Claims::subject`] picks one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Standard subject claim
    #[serde(default)]
    pub sub: Option<String>,
    /// Service-specific user id claim
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// The user identifier, preferring `user_id` over `sub`
    pub fn subject(&self) -> &str {
        self.user_id
            .as_deref()
            .or(self.sub.as_deref())
            .unwrap_or_default()
    }

    /// Expiry as a UTC timestamp, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Seconds remaining until expiry relative to `now` (negative if past)
    pub fn seconds_until_expiry(&self, now: i64) -> i64 {
        self.exp - now
    }
}

/// Derived, non-persisted view of the current credential.
///
/// Recomputed from the stored token on demand; a session only exists while
/// the token decodes and its expiry is in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub expires_at: i64,
}

impl Session {
    /// Build a session from a decoded claim set
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user: User::from_claims(claims),
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(user_id: Option<&str>, sub: Option<&str>) -> Claims {
        Claims {
            sub: sub.map(String::from),
            user_id: user_id.map(String::from),
            email: Some("ada@example.com".to_string()),
            name: None,
            exp: 2_000_000_000,
            iat: 1_000_000_000,
        }
    }

    #[test]
    fn subject_prefers_user_id_over_sub() {
        assert_eq!(claims(Some("u1"), Some("s1")).subject(), "u1");
        assert_eq!(claims(None, Some("s1")).subject(), "s1");
        assert_eq!(claims(None, None).subject(), "");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = User::from_claims(&claims(Some("u1"), None));
        assert_eq!(user.name.as_deref(), Some("ada"));

        let mut named = claims(Some("u1"), None);
        named.name = Some("Ada Lovelace".to_string());
        let user = User::from_claims(&named);
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
    }
}
