//! Dashboard settings from TOML (`[dashboard]` section)

use labdash_application::DashboardConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDashboardConfig {
    /// Rows per page of the high-risk patient table
    pub page_size: usize,
    /// Seconds between risk stat refreshes
    pub refresh_interval_seconds: u64,
    /// Risk level of the high-risk query (1 = abnormal or higher, 2 = critical)
    pub risk_level: u8,
    /// Maximum patients requested by the high-risk query
    pub risk_limit: u32,
}

impl Default for FileDashboardConfig {
    fn default() -> Self {
        let defaults = DashboardConfig::default();
        Self {
            page_size: defaults.page_size,
            refresh_interval_seconds: defaults.refresh_interval.as_secs(),
            risk_level: defaults.risk_level,
            risk_limit: defaults.risk_limit,
        }
    }
}

impl FileDashboardConfig {
    pub fn to_dashboard_config(&self) -> DashboardConfig {
        DashboardConfig::default()
            .with_page_size(self.page_size)
            .with_refresh_interval(Duration::from_secs(self.refresh_interval_seconds))
            .with_risk_level(self.risk_level)
            .with_risk_limit(self.risk_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        assert_eq!(
            FileDashboardConfig::default().to_dashboard_config(),
            DashboardConfig::default()
        );
    }
}
