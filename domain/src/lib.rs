//! Domain layer for labdash
//!
//! This crate contains the core types and pure logic of the dashboard client.
//! It has no dependencies on HTTP, storage or terminal concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! - **Session Credential**: the bearer token attached to every request
//! - **Page guard**: the client-side gate that sends protected pages to `/login`
//!
//! ## Chat stream
//!
//! - **Stream Event**: `status` / `token` / `done` records framed as `data: <json>\n\n`
//! - **Chat Turn**: a question and its incrementally built answer
//!
//! ## Reports
//!
//! View models built from the backend's report rows (counters, chart series,
//! tables) plus the [`Paginator`] used by the high-risk patient table.

pub mod chat;
pub mod core;
pub mod report;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use chat::{
    decoder::Utf8StreamDecoder,
    event::{StreamEvent, StreamEventKind},
    frame::{DATA_PREFIX, FRAME_DELIMITER, FrameError, FrameParser, parse_event_frame},
    turn::{CONNECTING_MESSAGE, CONNECTION_ERROR_MESSAGE, ChatTurn, StatusLine, TurnPhase, TurnUpdate},
};
pub use core::error::DomainError;
pub use report::{
    charts, endpoints,
    risk::{HighRiskCount, Probabilities, RiskDistribution, RiskPatient, UnreviewedSummary},
    rows::{CriticalResult, GenderRow, LabRow, RecentCritical, StatusCount, rows_from_value},
    series::{ChartKind, ChartSeries, SeriesPoint},
    summary::{CriticalAlerts, SummaryCounts, TopTestRow, top_tests},
};
pub use session::{
    credential::{ACCESS_TOKEN_KEY, SessionCredential},
    route::{GuardDecision, LOGIN_PATH, PUBLIC_PATHS, Page, guard_path, is_public_path},
};
pub use view::pagination::{DEFAULT_PAGE_SIZE, Paginator};
