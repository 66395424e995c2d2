//! SSE-style frame parsing.
//!
//! Frames are separated by a blank line and carry a `data: ` prefix:
//!
//! ```text
//! data: {"type":"status","content":"thinking"}
//!
//! data: {"type":"token","content":"Hi"}
//!
//! ```
//!
//! Text is pushed in whatever pieces the transport delivers. Only complete
//! frames are parsed; the trailing fragment waits for the next push.

use super::event::StreamEvent;
use thiserror::Error;
use tracing::trace;

/// Separator between frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Prefix of frames that carry an event payload.
pub const DATA_PREFIX: &str = "data: ";

/// A complete frame whose payload is not a valid [`StreamEvent`].
#[derive(Error, Debug)]
#[error("Malformed event payload: {source} (payload: {payload})")]
pub struct FrameError {
    pub payload: String,
    #[source]
    pub source: serde_json::Error,
}

/// Parse one complete frame.
///
/// Returns `None` for frames without the `data: ` prefix, which are ignored.
pub fn parse_event_frame(frame: &str) -> Option<Result<StreamEvent, FrameError>> {
    let payload = frame.strip_prefix(DATA_PREFIX)?;
    Some(
        serde_json::from_str(payload).map_err(|source| FrameError {
            payload: payload.to_string(),
            source,
        }),
    )
}

/// Accumulates decoded text and yields events for each complete frame.
#[derive(Debug, Default)]
pub struct FrameParser {
    buffer: String,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and parse every frame it completes, in arrival order.
    pub fn push(&mut self, text: &str) -> Vec<Result<StreamEvent, FrameError>> {
        self.buffer.push_str(text);

        let mut parsed = Vec::new();
        while let Some(end) = self.buffer.find(FRAME_DELIMITER) {
            let frame: String = self.buffer.drain(..end + FRAME_DELIMITER.len()).collect();
            let frame = &frame[..end];
            match parse_event_frame(frame) {
                Some(result) => parsed.push(result),
                None => trace!("Ignoring frame without data prefix ({} bytes)", frame.len()),
            }
        }
        parsed
    }

    /// The incomplete fragment retained for the next push.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    /// Consume the parser, returning the unparsed fragment.
    pub fn into_remainder(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_events(results: Vec<Result<StreamEvent, FrameError>>) -> Vec<StreamEvent> {
        results.into_iter().filter_map(Result::ok).collect()
    }

    #[test]
    fn test_single_complete_frame() {
        let mut parser = FrameParser::new();
        let events = ok_events(parser.push("data: {\"type\":\"token\",\"content\":\"Hi\"}\n\n"));
        assert_eq!(events, vec![StreamEvent::token("Hi")]);
        assert_eq!(parser.remainder(), "");
    }

    #[test]
    fn test_incomplete_frame_is_retained() {
        let mut parser = FrameParser::new();
        assert!(parser.push("data: {\"type\":\"tok").is_empty());
        assert_eq!(parser.remainder(), "data: {\"type\":\"tok");

        let events = ok_events(parser.push("en\",\"content\":\"x\"}\n"));
        assert!(events.is_empty());

        let events = ok_events(parser.push("\n"));
        assert_eq!(events, vec![StreamEvent::token("x")]);
    }

    #[test]
    fn test_multiple_frames_in_one_push() {
        let mut parser = FrameParser::new();
        let events = ok_events(parser.push(
            "data: {\"type\":\"status\",\"content\":\"a\"}\n\ndata: {\"type\":\"done\"}\n\ndata: {",
        ));
        assert_eq!(events, vec![StreamEvent::status("a"), StreamEvent::done()]);
        assert_eq!(parser.remainder(), "data: {");
    }

    #[test]
    fn test_malformed_frame_reported_and_stream_continues() {
        let mut parser = FrameParser::new();
        let results = parser.push(
            "data: {\"type\":\"token\",\"content\":\"a\"}\n\ndata: {not json}\n\ndata: {\"type\":\"token\",\"content\":\"b\"}\n\n",
        );
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        assert_eq!(
            ok_events(results),
            vec![StreamEvent::token("a"), StreamEvent::token("b")]
        );
    }

    #[test]
    fn test_frames_without_prefix_ignored() {
        let mut parser = FrameParser::new();
        let results = parser.push(": keep-alive\n\nevent: ping\n\n");
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_error_keeps_payload() {
        let err = parse_event_frame("data: {not json}").unwrap().unwrap_err();
        assert_eq!(err.payload, "{not json}");
        assert!(err.to_string().contains("Malformed event payload"));
    }

    #[test]
    fn test_extra_blank_lines() {
        let mut parser = FrameParser::new();
        let events = ok_events(parser.push("data: {\"type\":\"done\"}\n\n\n\n"));
        assert_eq!(events, vec![StreamEvent::done()]);
    }
}
