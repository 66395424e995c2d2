//! Application-level configuration.
//!
//! - [`DashboardConfig`]: paging, refresh cadence and high-risk query parameters

pub mod dashboard;

pub use dashboard::DashboardConfig;
