//! Credential storage backed by a JSON key/value file.

mod file_store;

pub use file_store::{FileCredentialStore, default_storage_path};
