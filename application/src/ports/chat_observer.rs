//! Chat observer port
//!
//! Receives the observable state changes of a chat turn as they happen, so
//! the presentation layer can render the answer live.

use labdash_domain::ChatTurn;

/// Callback for chat turn updates
///
/// All methods default to no-ops.
pub trait ChatObserver: Send + Sync {
    /// The status line text changed (visible or not).
    fn on_status(&self, _text: &str, _visible: bool) {}

    /// The status line was hidden.
    fn on_status_hidden(&self) {}

    /// Answer text was appended.
    fn on_token(&self, _token: &str) {}

    /// The server signalled the end of the answer (advisory).
    fn on_done(&self) {}

    /// The byte stream ended normally.
    fn on_complete(&self, _turn: &ChatTurn) {}

    /// The turn failed; `message` is the fixed error indicator.
    fn on_failed(&self, _message: &str) {}
}

/// No-op observer for when live rendering is not needed
pub struct NoChatObserver;

impl ChatObserver for NoChatObserver {}
