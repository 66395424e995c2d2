//! REPL (Read-Eval-Print Loop) for the lab assistant chat

use crate::dispatch::{ChatWindow, Control, Key, UiEvent, dispatch};
use crate::progress::reporter::ConsoleChatObserver;
use labdash_application::{StreamChatError, StreamChatUseCase};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;

/// How a chat session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    /// The chat window was closed; the caller's page continues.
    Closed,
    /// The user asked to quit the program.
    Quit,
    /// The backend rejected the session; the user has to log in again.
    SessionExpired,
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: StreamChatUseCase,
    show_status: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(use_case: StreamChatUseCase) -> Self {
        Self {
            use_case,
            show_status: true,
            history_path: dirs::data_dir().map(|p| p.join("labdash").join("history.txt")),
        }
    }

    /// Set whether to show the status spinner
    pub fn with_status(mut self, show: bool) -> Self {
        self.show_status = show;
        self
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL with its own line editor
    pub async fn run(&self) -> RlResult<ChatExit> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let exit = self.run_session(&mut rl).await;

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        exit
    }

    /// Run a chat session on an existing editor until it is closed
    pub async fn run_session(&self, rl: &mut DefaultEditor) -> RlResult<ChatExit> {
        let mut window = ChatWindow::new();
        window.apply(dispatch(&UiEvent::Click(Control::ChatToggle)));
        self.print_welcome();

        while window.is_open() {
            let line = match rl.readline("you> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    return Ok(ChatExit::Quit);
                }
                Err(err) => return Err(err),
            };

            if line.trim_start().starts_with('/') {
                match line.trim() {
                    "/quit" | "/exit" | "/q" => {
                        println!("Bye!");
                        return Ok(ChatExit::Quit);
                    }
                    "/close" => {
                        window.apply(dispatch(&UiEvent::Click(Control::ChatClose)));
                    }
                    "/help" | "/h" | "/?" => Self::print_help(),
                    cmd => {
                        println!("Unknown command: {}", cmd);
                        println!("Type /help for available commands");
                    }
                }
                continue;
            }

            window.set_input(line);
            let action = dispatch(&UiEvent::KeyPress {
                focus: Some(Control::ChatInput),
                key: Key::Enter,
            });
            let Some(question) = window.apply(action) else {
                continue;
            };

            let _ = rl.add_history_entry(question.as_str());
            if self.ask(&question).await == Some(ChatExit::SessionExpired) {
                return Ok(ChatExit::SessionExpired);
            }
        }

        Ok(ChatExit::Closed)
    }

    /// Send one question and render the answer live.
    ///
    /// Returns `Some(ChatExit::SessionExpired)` when the backend rejected the
    /// session.
    pub async fn ask(&self, question: &str) -> Option<ChatExit> {
        println!();
        let observer = ConsoleChatObserver::new(self.show_status);

        let outcome = match self.use_case.execute(question, &observer).await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}", e);
                return None;
            }
        };
        println!();

        match outcome.failure {
            Some(StreamChatError::Unauthorized) => Some(ChatExit::SessionExpired),
            Some(e) => {
                debug!("Chat turn ended with {}", e);
                None
            }
            None => None,
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Lab Assistant - Chat             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /close           - Close the chat window");
        println!("  /quit, /exit, /q - Exit labdash");
        println!();
    }
}
