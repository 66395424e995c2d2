//! Line-driven pager over the high-risk patient table.
//!
//! Each prompt line becomes a [`UiEvent`] and goes through the dispatch
//! table. Stat counters pushed by the poller are picked up between prompts.

use crate::ConsoleFormatter;
use crate::chat::{ChatExit, ChatRepl};
use crate::dispatch::{Action, dispatch, parse_command};
use labdash_application::{RiskDashboardState, RiskDashboardUseCase, RiskStats};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tokio::sync::mpsc;
use tracing::debug;

/// What the pager does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    /// Redraw the page.
    Render,
    /// Nothing changed.
    Stay,
    OpenChat,
    Exit(ChatExit),
}

pub struct RiskPager {
    use_case: RiskDashboardUseCase,
    state: RiskDashboardState,
    chat: Option<ChatRepl>,
    updates: Option<mpsc::Receiver<RiskStats>>,
}

impl RiskPager {
    pub fn new(use_case: RiskDashboardUseCase, state: RiskDashboardState) -> Self {
        Self {
            use_case,
            state,
            chat: None,
            updates: None,
        }
    }

    /// Attach the chat window opened by `c`.
    pub fn with_chat(mut self, chat: ChatRepl) -> Self {
        self.chat = Some(chat);
        self
    }

    /// Attach the receiving end of the stat poller.
    pub fn with_updates(mut self, updates: mpsc::Receiver<RiskStats>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn state(&self) -> &RiskDashboardState {
        &self.state
    }

    /// Take every pending stat refresh.
    ///
    /// `Render` when new counters arrived, `Exit(SessionExpired)` as soon as
    /// a refresh was rejected by the backend.
    pub fn apply_updates(&mut self) -> PagerStep {
        let Some(updates) = self.updates.as_mut() else {
            return PagerStep::Stay;
        };
        let mut step = PagerStep::Stay;
        while let Ok(stats) = updates.try_recv() {
            if stats.session_expired() {
                return PagerStep::Exit(ChatExit::SessionExpired);
            }
            self.state.stats = Some(stats);
            step = PagerStep::Render;
        }
        step
    }

    pub async fn handle(&mut self, action: Action) -> PagerStep {
        match action {
            Action::PrevPage => {
                if self.state.patients_mut().prev() {
                    PagerStep::Render
                } else {
                    PagerStep::Stay
                }
            }
            Action::NextPage => {
                if self.state.patients_mut().next() {
                    PagerStep::Render
                } else {
                    PagerStep::Stay
                }
            }
            Action::ReloadTable => {
                self.use_case.load_high_risk(&mut self.state).await;
                if self.state.session_expired() {
                    PagerStep::Exit(ChatExit::SessionExpired)
                } else {
                    PagerStep::Render
                }
            }
            Action::OpenChat => PagerStep::OpenChat,
            Action::Quit => PagerStep::Exit(ChatExit::Quit),
            Action::CloseChat | Action::SubmitChat | Action::None => PagerStep::Stay,
        }
    }

    /// Run the pager until the user quits or the session expires
    pub async fn run(&mut self) -> RlResult<ChatExit> {
        let mut rl = DefaultEditor::new()?;
        self.render();

        loop {
            match self.apply_updates() {
                PagerStep::Exit(exit) => return Ok(exit),
                PagerStep::Render => debug!("Applied refreshed risk stats"),
                _ => {}
            }

            let line = match rl.readline("risk> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    return Ok(ChatExit::Quit);
                }
                Err(err) => return Err(err),
            };

            // An empty line redraws with the latest counters
            let Some(event) = parse_command(&line) else {
                if let PagerStep::Exit(exit) = self.apply_updates() {
                    return Ok(exit);
                }
                self.render();
                continue;
            };

            let action = dispatch(&event);
            if action == Action::None {
                Self::print_help();
                continue;
            }

            match self.handle(action).await {
                PagerStep::Render => self.render(),
                PagerStep::Stay => {}
                PagerStep::OpenChat => {
                    let Some(chat) = self.chat.as_ref() else {
                        println!("Chat is not available here");
                        continue;
                    };
                    match chat.run_session(&mut rl).await? {
                        ChatExit::Closed => self.render(),
                        exit => return Ok(exit),
                    }
                }
                PagerStep::Exit(exit) => return Ok(exit),
            }
        }
    }

    fn render(&self) {
        println!("{}", ConsoleFormatter::format_risk_dashboard(&self.state));
        println!("[p]rev  [n]ext  [r]eload  [c]hat  [q]uit  (Enter to refresh)");
    }

    fn print_help() {
        println!("p/prev, n/next, r/reload, c/chat, q/quit");
    }
}
