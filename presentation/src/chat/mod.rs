//! Interactive chat module
//!
//! Provides a readline-based chat with the lab assistant.

mod repl;

pub use repl::{ChatExit, ChatRepl};
