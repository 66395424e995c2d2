//! File-backed credential store.
//!
//! The file holds a flat JSON object of string entries; the credential lives
//! under `access_token`. Other keys are preserved on save and clear.

use labdash_application::ports::credential_store::{CredentialStore, StoreError};
use labdash_domain::{ACCESS_TOKEN_KEY, SessionCredential};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// `$DATA_DIR/labdash/storage.json`
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("labdash").join("storage.json"))
}

pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Corrupt(e.to_string())),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Existing entries, or an empty map when the file is corrupt.
    fn read_map_for_update(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read_map() {
            Err(StoreError::Corrupt(reason)) => {
                warn!("Replacing corrupt storage file {}: {}", self.path.display(), reason);
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<SessionCredential>, StoreError> {
        let _guard = self.guard()?;
        let map = self.read_map()?;
        let token = map
            .get(ACCESS_TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(SessionCredential::from_stored(token))
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut map = self.read_map_for_update()?;
        map.insert(
            ACCESS_TOKEN_KEY.to_string(),
            Value::String(credential.as_str().to_string()),
        );
        self.write_map(&map)?;
        debug!("Stored credential in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut map = self.read_map_for_update()?;
        if map.remove(ACCESS_TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_map(&map)?;
        debug!("Removed credential from {}", self.path.display());
        Ok(())
    }
}
