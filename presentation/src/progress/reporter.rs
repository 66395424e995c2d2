//! Live rendering of a chat turn
//!
//! The status line is drawn as an indicatif spinner while the answer has not
//! started. Tokens are printed as they arrive.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use labdash_application::ChatObserver;
use labdash_domain::ChatTurn;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Prints a chat turn to stdout as it streams in
pub struct ConsoleChatObserver {
    show_status: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleChatObserver {
    pub fn new(show_status: bool) -> Self {
        Self {
            show_status,
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ConsoleChatObserver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ChatObserver for ConsoleChatObserver {
    fn on_status(&self, text: &str, visible: bool) {
        if !self.show_status || !visible {
            return;
        }
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        match spinner.as_ref() {
            Some(pb) => pb.set_message(text.to_string()),
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_message(text.to_string());
                pb.enable_steady_tick(Duration::from_millis(100));
                *spinner = Some(pb);
            }
        }
    }

    fn on_status_hidden(&self) {
        self.clear_spinner();
    }

    fn on_token(&self, token: &str) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "{}", token);
        let _ = stdout.flush();
    }

    fn on_complete(&self, turn: &ChatTurn) {
        self.clear_spinner();
        if !turn.answer().is_empty() {
            println!();
        }
    }

    fn on_failed(&self, message: &str) {
        self.clear_spinner();
        println!();
        println!("{}", message.red().bold());
    }
}
