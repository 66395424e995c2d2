//! Chat stream domain.
//!
//! The chatbot endpoint answers with a byte stream of `data: <json>\n\n`
//! frames. Bytes go through [`decoder::Utf8StreamDecoder`], text through
//! [`frame::FrameParser`], and each [`event::StreamEvent`] is applied to a
//! [`turn::ChatTurn`].

pub mod decoder;
pub mod event;
pub mod frame;
pub mod turn;
