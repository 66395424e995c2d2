//! Chart builders for the dashboard widgets.

use super::risk::RiskDistribution;
use super::rows::{GenderRow, LabRow, RecentCritical, StatusCount};
use super::series::{ChartKind, ChartSeries};

/// Number of tests shown in the recent critical activity chart.
pub const RECENT_CRITICAL_LIMIT: usize = 5;

/// Label used for rows without a gender.
const UNKNOWN_GENDER: &str = "Unknown";

/// Affected tests: patients per test, summed over statuses.
pub fn lab_chart(rows: &[LabRow]) -> ChartSeries {
    let mut series = ChartSeries::new(ChartKind::Bar, "Affected Tests");
    for row in rows {
        series.accumulate(&row.test_name, row.patient_count);
    }
    series
}

/// Patients per gender.
pub fn gender_chart(rows: &[GenderRow]) -> ChartSeries {
    let mut series = ChartSeries::new(ChartKind::Pie, "Gender Distribution");
    for row in rows {
        let gender = row.gender.as_deref().unwrap_or(UNKNOWN_GENDER);
        series.accumulate(gender, row.patient_count);
    }
    series
}

/// One slice per status row, in response order.
pub fn status_chart(rows: &[StatusCount]) -> ChartSeries {
    let mut series = ChartSeries::new(ChartKind::Doughnut, "Status Overview");
    for row in rows {
        series.push(row.status.clone(), row.count);
    }
    series
}

/// The first few tests with critical results in the last 24 hours.
pub fn recent_critical_chart(rows: &[RecentCritical]) -> ChartSeries {
    let mut series = ChartSeries::new(ChartKind::HorizontalBar, "Recent Critical Activity")
        .with_label("Critical Cases (24h)");
    for row in rows.iter().take(RECENT_CRITICAL_LIMIT) {
        series.push(row.test_name.clone(), row.count);
    }
    series
}

/// Patient-level risk split.
pub fn patient_risk_chart(distribution: &RiskDistribution) -> ChartSeries {
    let mut series = ChartSeries::new(ChartKind::Doughnut, "Patient Risk Distribution");
    series.push("Normal", distribution.normal);
    series.push("Abnormal", distribution.abnormal);
    series.push("Critical", distribution.critical);
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(test: &str, status: &str, patients: u64) -> LabRow {
        LabRow {
            test_name: test.to_string(),
            status: status.to_string(),
            patient_count: patients,
        }
    }

    #[test]
    fn test_lab_chart_sums_statuses() {
        let series = lab_chart(&[
            lab("Glucose", "ABNORMAL", 12),
            lab("Potassium", "CRITICAL", 3),
            lab("Glucose", "CRITICAL", 4),
        ]);
        assert_eq!(series.kind, ChartKind::Bar);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].label, "Glucose");
        assert_eq!(series.points[0].value, 16);
        assert_eq!(series.points[1].value, 3);
    }

    #[test]
    fn test_gender_chart_groups_unknown() {
        let series = gender_chart(&[
            GenderRow {
                gender: Some("F".into()),
                patient_count: 5,
            },
            GenderRow {
                gender: None,
                patient_count: 1,
            },
            GenderRow {
                gender: Some("F".into()),
                patient_count: 2,
            },
        ]);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].value, 7);
        assert_eq!(series.points[1].label, "Unknown");
    }

    #[test]
    fn test_recent_critical_takes_top_five() {
        let rows: Vec<RecentCritical> = (0..8)
            .map(|i| RecentCritical {
                test_name: format!("T{}", i),
                count: 10 - i,
            })
            .collect();
        let series = recent_critical_chart(&rows);
        assert_eq!(series.points.len(), RECENT_CRITICAL_LIMIT);
        assert_eq!(series.points[4].label, "T4");
        assert_eq!(series.label.as_deref(), Some("Critical Cases (24h)"));
    }

    #[test]
    fn test_patient_risk_chart_labels() {
        let series = patient_risk_chart(&RiskDistribution {
            normal: 1,
            abnormal: 47,
            critical: 53,
            total: None,
        });
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Normal", "Abnormal", "Critical"]);
        assert_eq!(series.total(), 101);
    }

    #[test]
    fn test_status_chart_one_slice_per_row() {
        let series = status_chart(&[
            StatusCount {
                status: "NORMAL".into(),
                count: 7,
            },
            StatusCount {
                status: "UNKNOWN".into(),
                count: 1,
            },
        ]);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.kind, ChartKind::Doughnut);
    }
}
