//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod api_gateway;
pub mod chat_observer;
pub mod conversation_logger;
pub mod credential_store;
pub mod navigator;
