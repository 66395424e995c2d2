//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod chat;
mod dashboard;
mod output;
mod server;
mod storage;

pub use chat::FileChatConfig;
pub use dashboard::FileDashboardConfig;
pub use output::FileOutputConfig;
pub use server::{DEFAULT_BASE_URL, FileServerConfig};
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("server.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("server.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("dashboard.page_size cannot be 0")]
    InvalidPageSize,

    #[error("dashboard.refresh_interval_seconds cannot be 0")]
    InvalidRefreshInterval,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection
    pub server: FileServerConfig,
    /// Credential storage
    pub storage: FileStorageConfig,
    /// Dashboard paging and refresh
    pub dashboard: FileDashboardConfig,
    /// Chat settings
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if self.dashboard.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize);
        }

        if self.dashboard.refresh_interval_seconds == 0 {
            return Err(ConfigValidationError::InvalidRefreshInterval);
        }

        Ok(())
    }
}
