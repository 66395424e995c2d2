//! CLI command definitions

use clap::{Parser, Subcommand};
use labdash_domain::Page;
use std::path::PathBuf;

/// CLI arguments for labdash
#[derive(Parser, Debug)]
#[command(name = "labdash")]
#[command(author, version, about = "Terminal client for the clinical lab-results dashboard")]
#[command(long_about = r#"
labdash shows the lab-results dashboard, the ML risk dashboard and the
lab assistant chat in the terminal.

Every request carries the token stored by `labdash login`. When the backend
rejects it, the token is removed and you are asked to log in again.

Configuration files are loaded from (in priority order):
1. LABDASH_* environment variables (e.g. LABDASH_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./labdash.toml      Project-level config
4. ~/.config/labdash/config.toml   Global config

Example:
  labdash login -u nurse
  labdash dashboard
  labdash risk --risk-level 1 --watch
  labdash ask "Which patients had critical potassium today?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Backend base URL (overrides server.base_url)
    #[arg(long, value_name = "URL", global = true)]
    pub server: Option<String>,

    /// Also write logs to a daily rolling file in the data directory
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and store the session token
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Remove the stored session token
    Logout,

    /// Show the lab results dashboard
    Dashboard {
        /// Print widgets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the ML risk dashboard with the paginated high-risk table
    Risk {
        /// Risk level filter (1 = abnormal or higher, 2 = critical)
        #[arg(long, value_name = "N")]
        risk_level: Option<u8>,

        /// Maximum number of patients to request
        #[arg(long, value_name = "N")]
        limit: Option<u32>,

        /// Keep refreshing the stat counters until Ctrl-C
        #[arg(long)]
        watch: bool,

        /// Print the dashboard as JSON and exit
        #[arg(long, conflicts_with = "watch")]
        json: bool,
    },

    /// Start an interactive chat with the lab assistant
    Chat,

    /// Ask the lab assistant a single question
    Ask {
        /// The question
        question: String,
    },
}

impl Command {
    /// The page this command shows, for the page guard.
    pub fn page(&self) -> Page {
        match self {
            Command::Login { .. } | Command::Logout => Page::Login,
            Command::Dashboard { .. } => Page::Dashboard,
            Command::Risk { .. } => Page::RiskDashboard,
            Command::Chat | Command::Ask { .. } => Page::Chat,
        }
    }
}
