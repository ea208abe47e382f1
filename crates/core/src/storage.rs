//! Credential storage abstraction.
//!
//! The session layer never touches raw storage keys directly; everything
//! goes through this trait so the persistence mechanism (browser local
//! storage, an in-memory map, an OS keychain) can be swapped without
//! touching callers.

use std::collections::HashMap;
use std::sync::Mutex;

/// Synchronous string-keyed storage for credentials and related state.
///
/// Operations are total: a missing platform store reads as empty and writes
/// are silently dropped. Reads and writes are atomic at the storage layer,
/// so no transaction discipline is required of callers.
pub trait CredentialStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any prior value
    fn set(&self, key: &str, value: &str);

    /// Remove the value stored under `key`. No-op if absent.
    fn remove(&self, key: &str);
}

/// In-memory storage for native hosts and tests
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(key);
        }
    }
}

// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub CredentialStorage {}

        impl CredentialStorage for CredentialStorage {
            fn get(&self, key: &str) -> Option<String>;
            fn set(&self, key: &str, value: &str);
            fn remove(&self, key: &str);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("jwt_token"), None);

        storage.set("jwt_token", "a.b.c");
        assert_eq!(storage.get("jwt_token").as_deref(), Some("a.b.c"));

        storage.set("jwt_token", "d.e.f");
        assert_eq!(storage.get("jwt_token").as_deref(), Some("d.e.f"));
    }

    #[test]
    fn remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set("refresh_token", "r1");
        storage.remove("refresh_token");
        storage.remove("refresh_token");
        assert_eq!(storage.get("refresh_token"), None);
    }
}
