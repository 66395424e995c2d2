//! Presentation layer for labdash
//!
//! This crate contains the CLI definition, console formatters, the chat
//! REPL, the risk dashboard pager and the UI-event dispatch table.

pub mod chat;
pub mod cli;
pub mod dispatch;
pub mod output;
pub mod progress;
pub mod risk;

// Re-export commonly used types
pub use chat::{ChatExit, ChatRepl};
pub use cli::commands::{Cli, Command};
pub use dispatch::{Action, ChatWindow, Control, Key, UiEvent, dispatch};
pub use output::console::{ConsoleFormatter, SESSION_EXPIRED_MESSAGE};
pub use progress::reporter::ConsoleChatObserver;
pub use risk::{PagerStep, RiskPager};
