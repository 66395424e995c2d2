//! Login / logout use case.
//!
//! Exchanges a username and password for a bearer token at `/auth/token`
//! and stores it as the session credential. Logout removes it.

use crate::ports::api_gateway::{ApiGateway, GatewayError};
use crate::ports::credential_store::{CredentialStore, StoreError};
use labdash_domain::endpoints::AUTH_TOKEN;
use labdash_domain::{ACCESS_TOKEN_KEY, DomainError, SessionCredential};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Username and password are required")]
    MissingInput,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Token response has no usable access_token: {0}")]
    InvalidToken(DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

pub struct LoginUseCase {
    gateway: Arc<dyn ApiGateway>,
    store: Arc<dyn CredentialStore>,
}

impl LoginUseCase {
    pub fn new(gateway: Arc<dyn ApiGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, store }
    }

    /// Log in and store the issued token, replacing any previous credential.
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionCredential, LoginError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingInput);
        }

        debug!("Requesting token for {}", username);
        let fields = [("username", username), ("password", password)];
        let body = self
            .gateway
            .post_form(AUTH_TOKEN, &fields)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        let token = body
            .get(ACCESS_TOKEN_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let credential = SessionCredential::new(token).map_err(LoginError::InvalidToken)?;

        self.store.save(&credential)?;
        info!("Logged in as {}", username);
        Ok(credential)
    }

    /// Remove the stored credential. Logging out twice is not an error.
    pub fn logout(&self) -> Result<(), LoginError> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::credential_store::InMemoryCredentialStore;
    use crate::use_cases::test_support::MockGateway;
    use serde_json::json;

    fn use_case(gateway: MockGateway) -> (LoginUseCase, Arc<InMemoryCredentialStore>, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        let store = Arc::new(InMemoryCredentialStore::new());
        (
            LoginUseCase::new(gateway.clone(), store.clone()),
            store,
            gateway,
        )
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (login, store, gateway) = use_case(MockGateway::new().with_form_result(Ok(Some(
            json!({"access_token": "eyJhbGciOiJIUzI1NiJ9.abc", "token_type": "bearer"}),
        ))));

        let credential = login.execute(" nurse ", "secret").await.unwrap();

        assert_eq!(credential.as_str(), "eyJhbGciOiJIUzI1NiJ9.abc");
        assert_eq!(store.load().unwrap(), Some(credential));
        assert_eq!(
            gateway.form_fields.lock().unwrap()[0],
            vec![
                ("username".to_string(), "nurse".to_string()),
                ("password".to_string(), "secret".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_login() {
        let (login, store, _) = use_case(MockGateway::new().with_form_result(Ok(None)));

        let err = login.execute("nurse", "wrong").await.unwrap_err();

        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_input_sends_nothing() {
        let (login, _, gateway) = use_case(MockGateway::new());

        assert_eq!(login.execute("  ", "pw").await, Err(LoginError::MissingInput));
        assert_eq!(login.execute("nurse", "").await, Err(LoginError::MissingInput));
        assert_eq!(gateway.request_count(AUTH_TOKEN), 0);
    }

    #[tokio::test]
    async fn test_response_without_token() {
        let (login, store, _) =
            use_case(MockGateway::new().with_form_result(Ok(Some(json!({"token_type": "bearer"})))));

        let err = login.execute("nurse", "pw").await.unwrap_err();

        assert_eq!(err, LoginError::InvalidToken(DomainError::EmptyCredential));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_credential() {
        let (login, store, _) = use_case(MockGateway::new());
        store.save(&SessionCredential::new("tok").unwrap()).unwrap();

        login.logout().unwrap();
        login.logout().unwrap();

        assert_eq!(store.load().unwrap(), None);
    }
}
