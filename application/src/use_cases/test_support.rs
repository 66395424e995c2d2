//! In-process doubles for use case tests.

use crate::ports::api_gateway::{ApiGateway, ByteStream, GatewayError, StreamResponse};
use crate::ports::chat_observer::ChatObserver;
use crate::ports::navigator::Navigator;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use labdash_domain::ChatTurn;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

type StreamScript = Result<Option<(u16, Vec<Result<Bytes, GatewayError>>)>, GatewayError>;

/// Gateway answering from canned responses keyed by path.
#[derive(Default)]
pub(crate) struct MockGateway {
    json: Mutex<HashMap<String, Result<Option<Value>, GatewayError>>>,
    stream: Mutex<Option<StreamScript>>,
    form: Mutex<Option<Result<Option<Value>, GatewayError>>>,
    pub(crate) requested: Mutex<Vec<String>>,
    pub(crate) stream_bodies: Mutex<Vec<Value>>,
    pub(crate) form_fields: Mutex<Vec<Vec<(String, String)>>>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_json(self, path: &str, value: Value) -> Self {
        self.json
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(Some(value)));
        self
    }

    pub(crate) fn with_json_result(
        self,
        path: &str,
        result: Result<Option<Value>, GatewayError>,
    ) -> Self {
        self.json.lock().unwrap().insert(path.to_string(), result);
        self
    }

    /// Successful stream delivering `chunks` in order.
    pub(crate) fn with_stream(self, chunks: Vec<&[u8]>) -> Self {
        let chunks = chunks
            .into_iter()
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        *self.stream.lock().unwrap() = Some(Ok(Some((200, chunks))));
        self
    }

    pub(crate) fn with_text_stream(self, chunks: Vec<&str>) -> Self {
        self.with_stream(chunks.into_iter().map(str::as_bytes).collect())
    }

    pub(crate) fn with_stream_result(self, script: StreamScript) -> Self {
        *self.stream.lock().unwrap() = Some(script);
        self
    }

    pub(crate) fn with_form_result(self, result: Result<Option<Value>, GatewayError>) -> Self {
        *self.form.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn request_count(&self, path: &str) -> usize {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }
}

#[async_trait]
impl ApiGateway for MockGateway {
    async fn get_json(&self, path: &str) -> Result<Option<Value>, GatewayError> {
        self.requested.lock().unwrap().push(path.to_string());
        self.json
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| {
                Err(GatewayError::Status {
                    status: 404,
                    path: path.to_string(),
                })
            })
    }

    async fn post_stream(
        &self,
        path: &str,
        body: Value,
    ) -> Result<Option<StreamResponse>, GatewayError> {
        self.requested.lock().unwrap().push(path.to_string());
        self.stream_bodies.lock().unwrap().push(body);
        match self.stream.lock().unwrap().take() {
            Some(Ok(Some((status, chunks)))) => {
                let body: ByteStream = Box::pin(stream::iter(chunks));
                Ok(Some(StreamResponse::new(status, body)))
            }
            Some(Ok(None)) => Ok(None),
            Some(Err(e)) => Err(e),
            None => Err(GatewayError::Transport("no stream scripted".to_string())),
        }
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<Option<Value>, GatewayError> {
        self.requested.lock().unwrap().push(path.to_string());
        self.form_fields.lock().unwrap().push(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self.form
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(GatewayError::Transport("no form scripted".to_string())))
    }
}

/// Navigator that records every target path.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub(crate) visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

/// Observer that records callbacks as readable strings.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub(crate) calls: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ChatObserver for RecordingObserver {
    fn on_status(&self, text: &str, visible: bool) {
        self.record(format!("status:{}:{}", text, visible));
    }

    fn on_status_hidden(&self) {
        self.record("hidden".to_string());
    }

    fn on_token(&self, token: &str) {
        self.record(format!("token:{}", token));
    }

    fn on_done(&self) {
        self.record("done".to_string());
    }

    fn on_complete(&self, turn: &ChatTurn) {
        self.record(format!("complete:{}", turn.answer()));
    }

    fn on_failed(&self, message: &str) {
        self.record(format!("failed:{}", message));
    }
}
