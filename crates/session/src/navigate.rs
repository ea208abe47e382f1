//! Navigation hook for auth-failure redirects.
//!
//! The gateway never talks to a router directly; it reports redirects
//! through this trait so hosts can wire in their own navigation and tests
//! can observe where a failure would have sent the user.

use std::sync::Mutex;

/// Redirect sink invoked when an auth failure forces navigation
pub trait Navigator: Send + Sync {
    /// Navigate the user to `path`
    fn redirect(&self, path: &str);
}

/// Navigator that drops redirects. Suitable for headless hosts.
#[derive(Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, _path: &str) {}
}

/// Navigator that records redirect targets instead of navigating.
///
/// Used by tests to assert on redirect behavior.
#[derive(Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All redirect targets observed so far, in order
    pub fn targets(&self) -> Vec<String> {
        self.targets
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        if let Ok(mut targets) = self.targets.lock() {
            targets.push(path.to_string());
        }
    }
}

/// Navigator backed by the browser window location (full-page redirect)
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct WindowNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for WindowNavigator {
    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}
