//! Application layer for labdash
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use ports::{
    api_gateway::{ApiGateway, ByteStream, GatewayError, StreamResponse},
    chat_observer::{ChatObserver, NoChatObserver},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    credential_store::{CredentialStore, InMemoryCredentialStore, StoreError},
    navigator::Navigator,
};
pub use use_cases::guard_page::GuardPageUseCase;
pub use use_cases::load_dashboard::{LabDashboard, LoadDashboardUseCase, WidgetState};
pub use use_cases::load_risk_dashboard::{
    RiskDashboardState, RiskDashboardUseCase, RiskStats,
};
pub use use_cases::login::{LoginError, LoginUseCase};
pub use use_cases::poll_risk_stats::RiskStatsPoller;
pub use use_cases::stream_chat::{ChatOutcome, StreamChatError, StreamChatUseCase};
