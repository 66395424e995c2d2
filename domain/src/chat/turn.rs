//! A single chat turn and its state machine.
//!
//! ```text
//! Idle ──▶ Connecting ──▶ Streaming ──▶ Complete
//!              │              │
//!              └──────────────┴──▶ Failed
//! ```
//!
//! `done` events are advisory: they hide the status line and set
//! [`ChatTurn::is_done_seen`], but only the end of the byte stream moves the
//! turn to `Complete`.

use super::event::{StreamEvent, StreamEventKind};
use crate::core::error::DomainError;
use serde::Serialize;

/// Status line shown while the request is being opened.
pub const CONNECTING_MESSAGE: &str = "Connecting...";

/// Status line shown when the turn fails.
pub const CONNECTION_ERROR_MESSAGE: &str = "⚠️ Connection error.";

/// Lifecycle phase of a [`ChatTurn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    Connecting,
    Streaming,
    Complete,
    Failed,
}

impl TurnPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Complete | TurnPhase::Failed)
    }
}

/// The transient status line above the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub visible: bool,
}

/// Observable change produced by applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnUpdate {
    /// Status text replaced.
    Status(String),
    /// Token appended; `hid_status` is true when this token hid the status line.
    Token { text: String, hid_status: bool },
    /// Advisory completion; `hid_status` as for tokens.
    Done { hid_status: bool },
    /// Event arrived outside the streaming phase and was dropped.
    Ignored,
}

/// A question and its incrementally built answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    question: String,
    answer: String,
    status: StatusLine,
    phase: TurnPhase,
    done_seen: bool,
}

impl ChatTurn {
    /// Start a turn from raw user input. Input is trimmed; empty input is rejected.
    pub fn new(input: &str) -> Result<Self, DomainError> {
        let question = input.trim();
        if question.is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        Ok(Self {
            question: question.to_string(),
            answer: String::new(),
            status: StatusLine {
                text: String::new(),
                visible: false,
            },
            phase: TurnPhase::Idle,
            done_seen: false,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether a `done` event has been observed.
    pub fn is_done_seen(&self) -> bool {
        self.done_seen
    }

    /// Idle → Connecting. Shows the "Connecting..." status line.
    pub fn begin_connect(&mut self) {
        if self.phase == TurnPhase::Idle {
            self.phase = TurnPhase::Connecting;
            self.status = StatusLine {
                text: CONNECTING_MESSAGE.to_string(),
                visible: true,
            };
        }
    }

    /// Connecting → Streaming, once a successful response is open.
    pub fn begin_streaming(&mut self) {
        if self.phase == TurnPhase::Connecting {
            self.phase = TurnPhase::Streaming;
        }
    }

    /// Apply one event. Only effective while streaming.
    pub fn apply(&mut self, event: &StreamEvent) -> TurnUpdate {
        if self.phase != TurnPhase::Streaming {
            return TurnUpdate::Ignored;
        }

        match event.kind {
            StreamEventKind::Status => {
                // Replaces the text only; a status line hidden by a token stays hidden
                self.status.text = event.content.clone();
                TurnUpdate::Status(event.content.clone())
            }
            StreamEventKind::Token => {
                let hid_status = self.hide_status();
                self.answer.push_str(&event.content);
                TurnUpdate::Token {
                    text: event.content.clone(),
                    hid_status,
                }
            }
            StreamEventKind::Done => {
                let hid_status = self.hide_status();
                self.done_seen = true;
                TurnUpdate::Done { hid_status }
            }
        }
    }

    /// Streaming → Complete, when the byte stream reports end of data.
    pub fn complete(&mut self) {
        if self.phase == TurnPhase::Streaming {
            self.phase = TurnPhase::Complete;
        }
    }

    /// Any non-terminal phase → Failed. The partial answer is kept.
    pub fn fail(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = TurnPhase::Failed;
        self.status = StatusLine {
            text: CONNECTION_ERROR_MESSAGE.to_string(),
            visible: true,
        };
    }

    fn hide_status(&mut self) -> bool {
        std::mem::replace(&mut self.status.visible, false)
    }
}
