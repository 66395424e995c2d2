//! Client-side routes and the page guard.
//!
//! The guard is a best-effort client gate, not a security boundary: the
//! backend still rejects unauthenticated requests with 401.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Paths reachable without a credential.
pub const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, "/", ""];

/// Pages of the dashboard client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Login,
    Dashboard,
    RiskDashboard,
    Chat,
}

impl Page {
    /// Navigation path of the page.
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Login => LOGIN_PATH,
            Page::Dashboard => "/dashboard",
            Page::RiskDashboard => "/ml-dashboard",
            Page::Chat => "/chat",
        }
    }

    pub fn is_public(&self) -> bool {
        is_public_path(self.path())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of the page guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue loading the page.
    Allow,
    /// Navigate to [`LOGIN_PATH`] before any page logic runs.
    RedirectToLogin,
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::RedirectToLogin)
    }
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Decide whether a page may load given whether a credential is stored.
pub fn guard_path(path: &str, has_credential: bool) -> GuardDecision {
    if is_public_path(path) || has_credential {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/login"));
        assert!(is_public_path("/"));
        assert!(is_public_path(""));
        assert!(!is_public_path("/dashboard"));
        assert!(!is_public_path("/login/"));
    }

    #[test]
    fn test_protected_without_credential_redirects() {
        assert_eq!(guard_path("/dashboard", false), GuardDecision::RedirectToLogin);
        assert_eq!(guard_path("/ml-dashboard", false), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_protected_with_credential_allowed() {
        assert_eq!(guard_path("/dashboard", true), GuardDecision::Allow);
    }

    #[test]
    fn test_public_without_credential_allowed() {
        assert_eq!(guard_path("/login", false), GuardDecision::Allow);
        assert_eq!(guard_path("/", false), GuardDecision::Allow);
    }

    #[test]
    fn test_page_paths() {
        assert!(Page::Login.is_public());
        assert!(Page::Home.is_public());
        assert!(!Page::Dashboard.is_public());
        assert!(!Page::RiskDashboard.is_public());
        assert!(!Page::Chat.is_public());
        assert_eq!(Page::RiskDashboard.to_string(), "/ml-dashboard");
    }
}
