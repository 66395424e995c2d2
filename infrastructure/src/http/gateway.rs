//! Authenticated request gateway over `reqwest`.

use super::request::{ApiRequest, RequestBody};
use async_trait::async_trait;
use futures::StreamExt;
use labdash_application::ports::api_gateway::{
    ApiGateway, ByteStream, GatewayError, StreamResponse,
};
use labdash_application::ports::credential_store::CredentialStore;
use labdash_application::ports::navigator::Navigator;
use labdash_domain::{LOGIN_PATH, SessionCredential};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Gateway to the dashboard backend.
///
/// No total request timeout is set: chat streams stay open as long as the
/// backend keeps writing. Only connecting is bounded.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| GatewayError::InvalidRequest(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            store,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a relative path against the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send `request` with the stored credential attached.
    ///
    /// Returns `Ok(None)` after handling a `401`: the credential is cleared
    /// and the navigator is sent to the login page. The body of a rejected
    /// response is never read. Anonymous requests carry no credential, and
    /// their `401` returns `Ok(None)` without touching the session.
    pub async fn send(&self, request: ApiRequest) -> Result<Option<Response>, GatewayError> {
        let credential = if request.authenticated {
            self.current_credential()
        } else {
            None
        };
        let headers = build_headers(&request.headers, credential.as_ref())?;

        match &credential {
            Some(c) => debug!(
                "{} {} with token {}",
                request.method,
                request.path,
                c.masked()
            ),
            None => debug!("{} {} without token", request.method, request.path),
        }

        let url = self.url(&request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers);
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            GatewayError::Transport(e.to_string())
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if !request.authenticated {
                debug!("{} answered 401", request.path);
                return Ok(None);
            }
            warn!(
                "{} rejected the session, redirecting to {}",
                request.path, LOGIN_PATH
            );
            self.clear_credential();
            self.navigator.navigate(LOGIN_PATH);
            return Ok(None);
        }

        Ok(Some(response))
    }

    /// Remove the stored credential, retrying once.
    ///
    /// The request is aborted either way; a credential that cannot be removed
    /// is only logged.
    fn clear_credential(&self) {
        let Err(first) = self.store.clear() else {
            return;
        };
        warn!("Failed to clear stored credential, retrying: {}", first);
        if let Err(e) = self.store.clear() {
            error!(
                "Stored credential could not be removed and will be sent again: {}",
                e
            );
        }
    }

    fn current_credential(&self) -> Option<SessionCredential> {
        match self.store.load() {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Failed to read stored credential: {}", e);
                None
            }
        }
    }

    async fn send_for_json(
        &self,
        request: ApiRequest,
    ) -> Result<Option<Value>, GatewayError> {
        let path = request.path.clone();
        let Some(response) = self.send(request).await? else {
            return Ok(None);
        };

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                path,
            });
        }

        response
            .json::<Value>()
            .await
            .map(Some)
            .map_err(|e| GatewayError::Decode {
                path,
                message: e.to_string(),
            })
    }
}

/// Caller headers plus `Authorization: Bearer <token>`, which replaces any
/// caller-supplied `Authorization`.
fn build_headers(
    headers: &[(String, String)],
    credential: Option<&SessionCredential>,
) -> Result<HeaderMap, GatewayError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::InvalidRequest(format!("header {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidRequest(format!("header {}: {}", name, e)))?;
        map.append(name, value);
    }

    if let Some(credential) = credential {
        let mut value = HeaderValue::from_str(&credential.bearer_value())
            .map_err(|e| GatewayError::InvalidRequest(format!("credential: {}", e)))?;
        value.set_sensitive(true);
        map.insert(AUTHORIZATION, value);
    }
    Ok(map)
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn get_json(&self, path: &str) -> Result<Option<Value>, GatewayError> {
        self.send_for_json(ApiRequest::get(path)).await
    }

    async fn post_stream(
        &self,
        path: &str,
        body: Value,
    ) -> Result<Option<StreamResponse>, GatewayError> {
        let request =
            ApiRequest::post_json(path, body).header("Content-Type", "application/json");
        let Some(response) = self.send(request).await? else {
            return Ok(None);
        };

        let status = response.status().as_u16();
        let body: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| GatewayError::StreamRead(e.to_string()))),
        );
        Ok(Some(StreamResponse::new(status, body)))
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<Option<Value>, GatewayError> {
        self.send_for_json(ApiRequest::post_form(path, fields).anonymous())
            .await
    }
}
