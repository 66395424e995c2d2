//! Configuration file loading for labdash
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LABDASH_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./labdash.toml` or `./.labdash.toml`
//! 4. Global: `$CONFIG_DIR/labdash/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileDashboardConfig, FileOutputConfig,
    FileServerConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
