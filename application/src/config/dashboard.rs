//! Dashboard parameters for use case behavior control.

use labdash_domain::endpoints::{DEFAULT_RISK_LEVEL, DEFAULT_RISK_LIMIT};
use labdash_domain::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between risk stat refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Parameters of the risk dashboard use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows per page of the high-risk patient table.
    pub page_size: usize,
    /// Interval of the risk stat poller.
    pub refresh_interval: Duration,
    /// Risk level filter of the high-risk query.
    pub risk_level: u8,
    /// Maximum patients requested by the high-risk query.
    pub risk_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            risk_level: DEFAULT_RISK_LEVEL,
            risk_limit: DEFAULT_RISK_LIMIT,
        }
    }
}

impl DashboardConfig {
    // ==================== Builder Methods ====================

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_risk_level(mut self, level: u8) -> Self {
        self.risk_level = level;
        self
    }

    pub fn with_risk_limit(mut self, limit: u32) -> Self {
        self.risk_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.risk_level, 2);
        assert_eq!(config.risk_limit, 100);
    }

    #[test]
    fn test_builders() {
        let config = DashboardConfig::default()
            .with_page_size(10)
            .with_risk_level(1)
            .with_risk_limit(50)
            .with_refresh_interval(Duration::from_secs(5));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.risk_level, 1);
        assert_eq!(config.risk_limit, 50);
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }
}
