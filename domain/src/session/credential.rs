//! Session credential (bearer token).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key under which the credential is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Number of leading characters shown when a token is logged.
const MASK_PREFIX_LEN: usize = 10;

/// An opaque bearer token.
///
/// Exists from a successful login until logout or a rejected (401) request.
/// `Debug` output is masked so tokens never reach logs in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Create a credential from a token string.
    ///
    /// Empty tokens are rejected: an empty stored value counts as "no token".
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        Ok(Self(token))
    }

    /// Interpret a raw stored value, treating missing and empty alike.
    pub fn from_stored(value: Option<String>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// First characters of the token followed by `...`, for logging.
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(MASK_PREFIX_LEN).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionCredential")
            .field(&self.masked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(SessionCredential::new(""), Err(DomainError::EmptyCredential));
    }

    #[test]
    fn test_from_stored_treats_empty_as_absent() {
        assert!(SessionCredential::from_stored(None).is_none());
        assert!(SessionCredential::from_stored(Some(String::new())).is_none());
        assert_eq!(
            SessionCredential::from_stored(Some("abc".to_string()))
                .unwrap()
                .as_str(),
            "abc"
        );
    }

    #[test]
    fn test_bearer_value() {
        let cred = SessionCredential::new("eyJhbGciOi.payload").unwrap();
        assert_eq!(cred.bearer_value(), "Bearer eyJhbGciOi.payload");
    }

    #[test]
    fn test_debug_is_masked() {
        let cred = SessionCredential::new("0123456789secret-part").unwrap();
        let debug = format!("{:?}", cred);
        assert!(debug.contains("0123456789..."));
        assert!(!debug.contains("secret-part"));
    }

    #[test]
    fn test_masked_short_token() {
        let cred = SessionCredential::new("abc").unwrap();
        assert_eq!(cred.masked(), "abc...");
    }

    #[test]
    fn test_serde_transparent() {
        let cred = SessionCredential::new("tok").unwrap();
        assert_eq!(serde_json::to_string(&cred).unwrap(), "\"tok\"");
    }
}
