//! Terminal-session navigator.
//!
//! There is no browser location in a terminal client. The navigator keeps
//! the current path and remembers whether a redirect to the login page
//! happened, so the caller can stop and tell the user to log in again.

use labdash_application::ports::navigator::Navigator;
use labdash_domain::LOGIN_PATH;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Debug)]
pub struct SessionNavigator {
    current: Mutex<String>,
    login_requested: AtomicBool,
}

impl SessionNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_path.into()),
            login_requested: AtomicBool::new(false),
        }
    }

    pub fn current_path(&self) -> String {
        self.current
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Whether anything navigated to the login page since the last reset.
    pub fn login_requested(&self) -> bool {
        self.login_requested.load(Ordering::SeqCst)
    }

    /// Clear the login flag, returning its previous value.
    pub fn take_login_request(&self) -> bool {
        self.login_requested.swap(false, Ordering::SeqCst)
    }
}

impl Default for SessionNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for SessionNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        if let Ok(mut current) = self.current.lock() {
            *current = path.to_string();
        }
        if path == LOGIN_PATH {
            self.login_requested.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_to_login_sets_flag() {
        let nav = SessionNavigator::new("/dashboard");
        assert!(!nav.login_requested());

        nav.navigate("/login");

        assert_eq!(nav.current_path(), "/login");
        assert!(nav.take_login_request());
        assert!(!nav.login_requested());
    }

    #[test]
    fn test_other_paths_do_not_set_flag() {
        let nav = SessionNavigator::default();
        nav.navigate("/ml-dashboard");
        assert_eq!(nav.current_path(), "/ml-dashboard");
        assert!(!nav.login_requested());
    }
}
