//! Counters, tables and alert lists for the lab dashboard.

use super::rows::{CriticalResult, LabRow, StatusCount, rows_from_value};
use serde::Serialize;
use serde_json::Value;

/// Rows shown in the top affected tests table.
pub const TOP_TESTS_LIMIT: usize = 10;

/// Alerts shown in the unreviewed critical panel.
pub const CRITICAL_ALERTS_LIMIT: usize = 5;

/// Summary cards: totals per result status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub total: u64,
    pub normal: u64,
    pub abnormal: u64,
    pub critical: u64,
    pub unknown: u64,
}

impl SummaryCounts {
    /// Fold status rows into the summary cards.
    ///
    /// Known statuses take the row's count; every other status adds to
    /// `unknown`. `total` covers all rows.
    pub fn from_rows(rows: &[StatusCount]) -> Self {
        let mut counts = Self::default();
        for row in rows {
            counts.total += row.count;
            match row.status.as_str() {
                "NORMAL" => counts.normal = row.count,
                "ABNORMAL" => counts.abnormal = row.count,
                "CRITICAL" => counts.critical = row.count,
                _ => counts.unknown += row.count,
            }
        }
        counts
    }
}

/// Row of the top affected tests table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopTestRow {
    pub test_name: String,
    pub status: String,
    pub patient_count: u64,
}

impl TopTestRow {
    /// CSS-style badge name (`badge-critical`, ...).
    pub fn badge(&self) -> String {
        format!("badge-{}", self.status.to_lowercase())
    }
}

/// The first [`TOP_TESTS_LIMIT`] lab rows.
pub fn top_tests(rows: &[LabRow]) -> Vec<TopTestRow> {
    rows.iter()
        .take(TOP_TESTS_LIMIT)
        .map(|row| TopTestRow {
            test_name: row.test_name.clone(),
            status: row.status.clone(),
            patient_count: row.patient_count,
        })
        .collect()
}

/// Content of the unreviewed critical alerts panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum CriticalAlerts {
    /// The backend returned an empty list.
    NonePending,
    /// Formatted alert lines (possibly empty for a non-list body).
    Items(Vec<String>),
}

impl CriticalAlerts {
    pub const NONE_PENDING_MESSAGE: &'static str = "No pending critical alerts 🎉";

    pub fn from_value(value: &Value) -> Self {
        if value.as_array().is_some_and(|items| items.is_empty()) {
            return CriticalAlerts::NonePending;
        }
        let rows: Vec<CriticalResult> = rows_from_value(value);
        CriticalAlerts::Items(
            rows.iter()
                .take(CRITICAL_ALERTS_LIMIT)
                .map(format_alert)
                .collect(),
        )
    }
}

/// `Subject <id> | <test>: <value> <unit>`
pub fn format_alert(row: &CriticalResult) -> String {
    let value = match &row.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let line = format!("Subject {} | {}: {}", row.subject_id, row.test_name, value);
    match row.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{} {}", line, unit),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(status: &str, count: u64) -> StatusCount {
        StatusCount {
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn test_summary_counts() {
        let counts = SummaryCounts::from_rows(&[
            status("NORMAL", 100),
            status("ABNORMAL", 20),
            status("CRITICAL", 5),
            status("UNKNOWN", 3),
            status("PENDING", 2),
        ]);
        assert_eq!(
            counts,
            SummaryCounts {
                total: 130,
                normal: 100,
                abnormal: 20,
                critical: 5,
                unknown: 5,
            }
        );
    }

    #[test]
    fn test_summary_counts_empty() {
        assert_eq!(SummaryCounts::from_rows(&[]), SummaryCounts::default());
    }

    #[test]
    fn test_top_tests_limited_to_ten() {
        let rows: Vec<LabRow> = (0..15)
            .map(|i| LabRow {
                test_name: format!("Test {}", i),
                status: "CRITICAL".into(),
                patient_count: i,
            })
            .collect();
        let table = top_tests(&rows);
        assert_eq!(table.len(), TOP_TESTS_LIMIT);
        assert_eq!(table[0].badge(), "badge-critical");
    }

    #[test]
    fn test_alerts_empty_list() {
        assert_eq!(CriticalAlerts::from_value(&json!([])), CriticalAlerts::NonePending);
    }

    #[test]
    fn test_alerts_formatted_and_limited() {
        let rows: Vec<Value> = (0..7)
            .map(|i| json!({"subject_id": 10000000 + i, "test_name": "Potassium", "value": 6.8, "unit": "mEq/L"}))
            .collect();
        let CriticalAlerts::Items(items) = CriticalAlerts::from_value(&Value::Array(rows)) else {
            panic!("expected items");
        };
        assert_eq!(items.len(), CRITICAL_ALERTS_LIMIT);
        assert_eq!(items[0], "Subject 10000000 | Potassium: 6.8 mEq/L");
    }

    #[test]
    fn test_alert_without_unit() {
        let row = CriticalResult {
            subject_id: 7,
            test_name: "Troponin".into(),
            value: json!("positive"),
            unit: None,
        };
        assert_eq!(format_alert(&row), "Subject 7 | Troponin: positive");
    }

    #[test]
    fn test_alerts_non_array_body() {
        assert_eq!(
            CriticalAlerts::from_value(&json!({"detail": "x"})),
            CriticalAlerts::Items(vec![])
        );
    }
}
