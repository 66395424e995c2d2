//! REST endpoints consumed by the dashboards.

pub const REPORTS_SUMMARY: &str = "/reports/summary";
pub const REPORTS_BY_LAB: &str = "/reports/by-lab";
pub const REPORTS_BY_GENDER: &str = "/reports/by-gender";
pub const REPORTS_UNREVIEWED_CRITICAL: &str = "/reports/unreviewed-critical";
pub const REPORTS_UNREVIEWED_CRITICAL_SUMMARY: &str = "/reports/unreviewed-critical-summary";
pub const REPORTS_RECENT_CRITICAL: &str = "/reports/recent-critical";
pub const REPORTS_PATIENT_RISK: &str = "/reports/patient-risk";
pub const REPORTS_HIGH_RISK_PATIENTS: &str = "/reports/high-risk-patients";
pub const PREDICT_RISK_DISTRIBUTION: &str = "/predict/risk-distribution";
pub const PREDICT_HIGH_RISK: &str = "/predict/high-risk";
pub const CHAT_STREAM: &str = "/chat/stream";
pub const AUTH_TOKEN: &str = "/auth/token";

/// Risk level filter: 1 = abnormal or higher, 2 = critical only.
pub const DEFAULT_RISK_LEVEL: u8 = 2;

/// Maximum number of high-risk patients requested.
pub const DEFAULT_RISK_LIMIT: u32 = 100;

/// `/predict/high-risk?risk_level=<level>&limit=<limit>`
pub fn high_risk_path(risk_level: u8, limit: u32) -> String {
    format!(
        "{}?risk_level={}&limit={}",
        PREDICT_HIGH_RISK, risk_level, limit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_path() {
        assert_eq!(
            high_risk_path(DEFAULT_RISK_LEVEL, DEFAULT_RISK_LIMIT),
            "/predict/high-risk?risk_level=2&limit=100"
        );
        assert_eq!(high_risk_path(1, 20), "/predict/high-risk?risk_level=1&limit=20");
    }
}
