//! Browser-backed credential storage

use tasklink_core::CredentialStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Credential storage over the browser's local storage.
///
/// Values persist across page reloads. A missing storage object (storage
/// disabled, non-browser context) reads as empty and swallows writes,
/// matching the total-function contract of the trait.
#[derive(Default)]
pub struct BrowserStorage;

impl CredentialStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
