//! Infrastructure layer for labdash
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod navigation;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileDashboardConfig,
    FileOutputConfig, FileServerConfig, FileStorageConfig,
};
pub use http::{ApiRequest, HttpGateway, RequestBody};
pub use logging::JsonlConversationLogger;
pub use navigation::SessionNavigator;
pub use storage::{FileCredentialStore, default_storage_path};
