//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod guard_page;
pub mod load_dashboard;
pub mod load_risk_dashboard;
pub mod login;
pub mod poll_risk_stats;
pub mod stream_chat;

#[cfg(test)]
pub(crate) mod test_support;
