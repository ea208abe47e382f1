//! Single source of truth for the persisted credential.
//!
//! Every read of the token goes through here; feature code never touches
//! raw storage keys. All operations are total: decode failures degrade to
//! "absent/invalid" so auth checks never raise.

use crate::config::{CONVERSATION_KEY, REFRESH_TOKEN_KEY, TOKEN_KEY};
use chrono::Utc;
use std::sync::Arc;
use tasklink_core::claims::DecodeError;
use tasklink_core::{Claims, CredentialStorage, Session, decode_claims};

/// Persisted credential store with derived session inspection
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self { storage }
    }

    /// Persist a token, and the refresh token when one was issued.
    ///
    /// Overwrites any prior value; subsequent reads see the new token
    /// immediately.
    pub fn save(&self, token: &str, refresh_token: Option<&str>) {
        self.storage.set(TOKEN_KEY, token);
        if let Some(refresh) = refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, refresh);
        }
    }

    /// Replace only the bearer token, keeping the stored refresh token
    pub fn save_access_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    /// The currently stored token, if any
    pub fn read(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// The currently stored refresh token, if any
    pub fn read_refresh(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// Remove both tokens. Idempotent.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }

    /// Decode a token's claim set without verifying the signature
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        decode_claims(token)
    }

    /// Whether the token is expired. An undecodable token counts as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        Self::is_expired_at(token, Utc::now().timestamp())
    }

    /// Expiry check against an explicit clock
    pub fn is_expired_at(token: &str, now: i64) -> bool {
        match decode_claims(token) {
            Ok(claims) => claims.exp <= now,
            Err(_) => true,
        }
    }

    /// Whether the token expires within `threshold_secs`. An undecodable
    /// token counts as expiring. A token with exactly `threshold_secs` left
    /// is not yet expiring.
    pub fn is_expiring_soon(&self, token: &str, threshold_secs: i64) -> bool {
        Self::is_expiring_soon_at(token, Utc::now().timestamp(), threshold_secs)
    }

    /// Expiring-soon check against an explicit clock
    pub fn is_expiring_soon_at(token: &str, now: i64, threshold_secs: i64) -> bool {
        match decode_claims(token) {
            Ok(claims) => claims.seconds_until_expiry(now) < threshold_secs,
            Err(_) => true,
        }
    }

    /// The current session, recomputed from the stored token.
    ///
    /// Returns `None` when no token is stored, the token does not decode,
    /// or it has expired. An expired or undecodable token is also removed
    /// from storage, so every read path converges on the same stored state.
    pub fn current_session(&self) -> Option<Session> {
        self.current_session_at(Utc::now().timestamp())
    }

    /// Session computation against an explicit clock
    pub fn current_session_at(&self, now: i64) -> Option<Session> {
        let token = self.read()?;
        match decode_claims(&token) {
            Ok(claims) if claims.exp > now => Some(Session::from_claims(&claims)),
            Ok(_) => {
                tracing::debug!("stored token expired, clearing");
                self.clear();
                None
            }
            Err(err) => {
                tracing::debug!("stored token undecodable ({err}), clearing");
                self.clear();
                None
            }
        }
    }

    /// The stored chat conversation id, if any
    pub fn conversation_id(&self) -> Option<String> {
        self.storage.get(CONVERSATION_KEY)
    }

    /// Persist the chat conversation id for continuity across messages
    pub fn set_conversation_id(&self, id: &str) {
        self.storage.set(CONVERSATION_KEY, id);
    }

    /// Drop the stored chat conversation id
    pub fn clear_conversation_id(&self) {
        self.storage.remove(CONVERSATION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;
    use tasklink_core::MemoryStorage;

    fn store() -> TokenStore {
        TokenStore::new(Arc::new(MemoryStorage::new()))
    }

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            json!({"user_id": "u1", "email": "x@example.com", "exp": exp, "iat": 0})
                .to_string()
                .as_bytes(),
        );
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn save_then_read_round_trips() {
        let store = store();
        assert_eq!(store.read(), None);

        store.save("a.b.c", None);
        assert_eq!(store.read().as_deref(), Some("a.b.c"));
        assert_eq!(store.read_refresh(), None);

        store.save("d.e.f", Some("r.1"));
        assert_eq!(store.read().as_deref(), Some("d.e.f"));
        assert_eq!(store.read_refresh().as_deref(), Some("r.1"));
    }

    #[test]
    fn clear_removes_both_tokens_and_is_idempotent() {
        let store = store();
        store.save("a.b.c", Some("r.1"));

        store.clear();
        assert_eq!(store.read(), None);
        assert_eq!(store.read_refresh(), None);

        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn malformed_tokens_are_expired() {
        assert!(TokenStore::is_expired_at("no-dots", 0));
        assert!(TokenStore::is_expired_at("a.b", 0));
        assert!(TokenStore::is_expired_at("a.b.c.d", 0));
        assert!(TokenStore::is_expired_at("a.b.c", 0));
    }

    #[test]
    fn expiry_boundaries() {
        let now = 1_700_000_000;
        assert!(TokenStore::is_expired_at(&token_with_exp(now - 1), now));
        assert!(TokenStore::is_expired_at(&token_with_exp(now), now));
        assert!(!TokenStore::is_expired_at(&token_with_exp(now + 3600), now));
    }

    #[test]
    fn expiring_soon_boundary_is_exclusive() {
        let now = 1_700_000_000;
        assert!(TokenStore::is_expiring_soon_at(
            &token_with_exp(now + 299),
            now,
            300
        ));
        assert!(!TokenStore::is_expiring_soon_at(
            &token_with_exp(now + 300),
            now,
            300
        ));
        assert!(TokenStore::is_expiring_soon_at("garbage", now, 300));
    }

    #[test]
    fn current_session_exposes_the_decoded_claims() {
        let store = store();
        let now = 1_700_000_000;
        store.save(&token_with_exp(now + 3600), None);

        let session = store.current_session_at(now).unwrap();
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.email, "x@example.com");
        assert_eq!(session.expires_at, now + 3600);
    }

    #[test]
    fn expired_read_clears_storage() {
        let store = store();
        let now = 1_700_000_000;
        store.save(&token_with_exp(now - 1), Some("r.1"));

        assert!(store.current_session_at(now).is_none());
        assert_eq!(store.read(), None);
        assert_eq!(store.read_refresh(), None);
    }

    #[test]
    fn undecodable_read_clears_storage() {
        let store = store();
        store.save("a.b.c", None);

        assert!(store.current_session_at(0).is_none());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn absent_token_yields_no_session() {
        assert!(store().current_session_at(0).is_none());
    }

    #[test]
    fn conversation_id_round_trips() {
        let store = store();
        assert_eq!(store.conversation_id(), None);

        store.set_conversation_id("c1");
        assert_eq!(store.conversation_id().as_deref(), Some("c1"));

        store.clear_conversation_id();
        assert_eq!(store.conversation_id(), None);
    }
}
