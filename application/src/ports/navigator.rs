//! Navigation port
//!
//! Client-side navigation, used to send the user to the login page.

/// Performs client-side navigation.
pub trait Navigator: Send + Sync {
    /// Navigate to `path` (e.g. `/login`).
    fn navigate(&self, path: &str);
}
