//! Outgoing request description.

use reqwest::Method;
use serde_json::Value;

/// Body of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// A request as the caller built it, before authentication.
///
/// `path` is either relative to the gateway's base URL or an absolute
/// `http(s)://` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Attach the stored credential and treat a 401 as an expired session.
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(RequestBody::Json(body))
    }

    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::new(Method::POST, path).with_body(RequestBody::Form(fields))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Send without the stored credential.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders() {
        let req = ApiRequest::post_json("/chat/stream", json!({"question": "q"}))
            .header("Content-Type", "application/json");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.body, RequestBody::Json(json!({"question": "q"})));

        let form = ApiRequest::post_form("/auth/token", &[("username", "u")]);
        assert_eq!(
            form.body,
            RequestBody::Form(vec![("username".to_string(), "u".to_string())])
        );
        assert!(form.authenticated);
        assert!(!form.anonymous().authenticated);
        assert_eq!(ApiRequest::get("/x").body, RequestBody::Empty);
    }
}
