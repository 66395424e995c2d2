//! Stream Chat use case.
//!
//! Sends one question to `POST /chat/stream` and applies the streamed
//! `data: <json>\n\n` events to a [`ChatTurn`] as they arrive.
//!
//! The body is read chunk by chunk: bytes go through a stateful
//! [`Utf8StreamDecoder`] (so a multi-byte character split across reads is
//! reassembled), the decoded text goes into a [`FrameParser`], and each
//! complete frame is applied to the turn in order. Malformed frames are
//! logged and skipped. The turn completes only when the byte stream ends;
//! a `done` event before that is advisory.

use crate::ports::api_gateway::{ApiGateway, GatewayError, StreamResponse};
use crate::ports::chat_observer::ChatObserver;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use futures::StreamExt;
use labdash_domain::endpoints::CHAT_STREAM;
use labdash_domain::{
    CONNECTION_ERROR_MESSAGE, ChatTurn, DomainError, FrameParser, StreamEvent, TurnUpdate,
    Utf8StreamDecoder,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a chat turn could not be started or did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamChatError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Session expired")]
    Unauthorized,

    #[error("Chat stream returned status {0}")]
    Status(u16),
}

/// Result of a started chat turn.
///
/// `failure` is set when the turn ended in the `Failed` phase.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub turn: ChatTurn,
    pub failure: Option<StreamChatError>,
}

impl ChatOutcome {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Use case for streaming one chat answer.
#[derive(Clone)]
pub struct StreamChatUseCase {
    gateway: Arc<dyn ApiGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl StreamChatUseCase {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run one chat turn.
    ///
    /// Empty (after trimming) input is rejected with
    /// [`StreamChatError::InvalidQuestion`] and nothing is sent. Every other
    /// outcome, including connection failures, is returned as a
    /// [`ChatOutcome`] so the partial answer stays available.
    pub async fn execute(
        &self,
        input: &str,
        observer: &dyn ChatObserver,
    ) -> Result<ChatOutcome, StreamChatError> {
        let mut turn = ChatTurn::new(input).map_err(StreamChatError::InvalidQuestion)?;

        info!("Sending chat question ({} chars)", turn.question().len());
        self.conversation_logger.log(ConversationEvent::new(
            "chat_question",
            json!({ "question": turn.question() }),
        ));

        turn.begin_connect();
        observer.on_status(&turn.status().text, turn.status().visible);

        let body = json!({ "question": turn.question() });
        let response = match self.gateway.post_stream(CHAT_STREAM, body).await {
            Ok(Some(response)) if response.is_success() => response,
            Ok(Some(response)) => {
                return Ok(self.fail(turn, StreamChatError::Status(response.status), observer));
            }
            Ok(None) => return Ok(self.fail(turn, StreamChatError::Unauthorized, observer)),
            Err(e) => return Ok(self.fail(turn, StreamChatError::Gateway(e), observer)),
        };

        turn.begin_streaming();
        if let Err(e) = self.consume(&mut turn, response, observer).await {
            return Ok(self.fail(turn, e, observer));
        }

        turn.complete();
        debug!(
            "Chat stream ended ({} chars, done seen: {})",
            turn.answer().len(),
            turn.is_done_seen()
        );
        observer.on_complete(&turn);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_answer",
            json!({
                "question": turn.question(),
                "answer": turn.answer(),
                "outcome": "complete",
            }),
        ));

        Ok(ChatOutcome {
            turn,
            failure: None,
        })
    }

    async fn consume(
        &self,
        turn: &mut ChatTurn,
        response: StreamResponse,
        observer: &dyn ChatObserver,
    ) -> Result<(), StreamChatError> {
        let mut body = response.body;
        let mut decoder = Utf8StreamDecoder::new();
        let mut parser = FrameParser::new();

        while let Some(chunk) = body.next().await {
            let bytes = chunk?;
            let text = decoder.decode(&bytes);
            for result in parser.push(&text) {
                match result {
                    Ok(event) => apply_event(turn, &event, observer),
                    Err(e) => warn!("Skipping malformed chat frame: {}", e),
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() || !parser.remainder().is_empty() {
            debug!(
                "Discarding {} unterminated bytes at end of chat stream",
                parser.remainder().len() + tail.len()
            );
        }
        Ok(())
    }

    fn fail(
        &self,
        mut turn: ChatTurn,
        error: StreamChatError,
        observer: &dyn ChatObserver,
    ) -> ChatOutcome {
        warn!("Chat turn failed: {}", error);
        turn.fail();
        observer.on_failed(CONNECTION_ERROR_MESSAGE);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_failed",
            json!({
                "question": turn.question(),
                "answer": turn.answer(),
                "outcome": "failed",
                "error": error.to_string(),
            }),
        ));
        ChatOutcome {
            turn,
            failure: Some(error),
        }
    }
}

fn apply_event(turn: &mut ChatTurn, event: &StreamEvent, observer: &dyn ChatObserver) {
    match turn.apply(event) {
        TurnUpdate::Status(text) => observer.on_status(&text, turn.status().visible),
        TurnUpdate::Token { text, hid_status } => {
            if hid_status {
                observer.on_status_hidden();
            }
            observer.on_token(&text);
        }
        TurnUpdate::Done { hid_status } => {
            if hid_status {
                observer.on_status_hidden();
            }
            observer.on_done();
        }
        TurnUpdate::Ignored => {}
    }
}
