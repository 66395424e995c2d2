//! Chat settings from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// JSONL transcript file; no transcript when unset
    pub transcript: Option<String>,
    /// Show the status line (spinner) while an answer streams
    pub show_status: bool,
    /// REPL history file; defaults to `$DATA_DIR/labdash/history.txt`
    pub history_file: Option<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            transcript: None,
            show_status: true,
            history_file: None,
        }
    }
}

impl FileChatConfig {
    pub fn transcript_path(&self) -> Option<PathBuf> {
        self.transcript.as_deref().map(super::storage::expand_home)
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.as_deref().map(super::storage::expand_home)
    }
}
