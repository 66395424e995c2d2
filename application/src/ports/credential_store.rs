//! Credential store port
//!
//! Persistent storage for the single session credential, kept under
//! [`ACCESS_TOKEN_KEY`](labdash_domain::ACCESS_TOKEN_KEY).

use labdash_domain::SessionCredential;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the credential store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),
}

/// Storage for the session credential.
///
/// At most one credential exists at a time; `save` replaces it.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential. Missing and empty values are `None`.
    fn load(&self) -> Result<Option<SessionCredential>, StoreError>;

    /// Store a credential, replacing any previous one.
    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError>;

    /// Remove the credential. Removing an absent credential is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store for tests.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Option<SessionCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: SessionCredential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<SessionCredential>, StoreError> {
        self.credential
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
