//! Console output formatter for the dashboard pages

use colored::{ColoredString, Colorize};
use labdash_application::use_cases::load_risk_dashboard::NO_HIGH_RISK_MESSAGE;
use labdash_application::{LabDashboard, RiskDashboardState, RiskStats, WidgetState};
use labdash_domain::{ChartSeries, CriticalAlerts, RiskPatient, SummaryCounts, TopTestRow};
use serde::Serialize;
use serde_json::json;

/// Shown in place of a widget whose request hit an expired session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, run `labdash login`";

const BAR_WIDTH: usize = 30;

/// Formats dashboard pages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the lab results dashboard
    pub fn format_dashboard(dashboard: &LabDashboard) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Lab Results Dashboard"));
        output.push('\n');

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&Self::widget(&dashboard.summary, Self::format_summary));

        output.push_str(&Self::section_header("Tests by Lab"));
        output.push_str(&Self::widget(&dashboard.lab_chart, Self::format_chart));

        output.push_str(&Self::section_header("Patients by Gender"));
        output.push_str(&Self::widget(&dashboard.gender_chart, Self::format_chart));

        output.push_str(&Self::section_header("Results by Status"));
        output.push_str(&Self::widget(&dashboard.status_chart, Self::format_chart));

        output.push_str(&Self::section_header("Top Tests"));
        output.push_str(&Self::widget(&dashboard.top_tests, |rows| {
            Self::format_top_tests(rows)
        }));

        output.push_str(&Self::section_header("Unreviewed Critical Alerts"));
        output.push_str(&Self::widget(&dashboard.alerts, Self::format_alerts));

        output.push_str(&Self::footer());
        output
    }

    /// Format the ML risk dashboard, showing the current table page
    pub fn format_risk_dashboard(state: &RiskDashboardState) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("ML Risk Dashboard"));
        output.push('\n');

        if let Some(stats) = &state.stats {
            output.push_str(&Self::format_risk_stats(stats));
        }

        if let Some(chart) = &state.patient_risk_chart {
            output.push_str(&Self::section_header("Patient Risk"));
            output.push_str(&Self::widget(chart, Self::format_chart));
        }

        if let Some(chart) = &state.recent_critical_chart {
            output.push_str(&Self::section_header("Recent Critical Results"));
            output.push_str(&Self::widget(chart, Self::format_chart));
        }

        output.push_str(&Self::section_header(&format!(
            "High-Risk Patients (risk level >= {})",
            state.risk_level()
        )));
        output.push_str(&Self::format_high_risk_table(state));

        output.push_str(&Self::footer());
        output
    }

    /// Format the periodically refreshed stat counters
    pub fn format_risk_stats(stats: &RiskStats) -> String {
        let mut output = Self::section_header("Risk Overview");

        output.push_str(&Self::widget(&stats.distribution, |d| {
            format!(
                "  {} {}   {} {}   {} {}\n",
                "Normal:".green().bold(),
                d.normal,
                "Abnormal:".yellow().bold(),
                d.abnormal,
                "Critical:".red().bold(),
                d.critical
            )
        }));
        output.push_str(&Self::widget(&stats.unreviewed, |u| {
            format!(
                "  {} {} ({} patients)\n",
                "Unreviewed critical:".cyan().bold(),
                u.total_unreviewed,
                u.affected_patients
            )
        }));
        output.push_str(&Self::widget(&stats.high_risk_count, |h| {
            format!(
                "  {} {}\n",
                "High-risk patients:".cyan().bold(),
                h.critical_patients
            )
        }));

        output
    }

    /// Draw a series as horizontal text bars scaled to the largest value
    pub fn format_chart(series: &ChartSeries) -> String {
        let mut output = format!("  {}", series.title.bold());
        if let Some(label) = &series.label {
            output.push_str(&format!(" {}", format!("({})", label).dimmed()));
        }
        output.push('\n');

        if series.is_empty() {
            output.push_str(&format!("  {}\n", "No data".dimmed()));
            return output;
        }

        let label_width = series
            .points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0);
        let max = series.max_value();

        for point in &series.points {
            let filled = if max == 0 {
                0
            } else {
                ((point.value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
            };
            output.push_str(&format!(
                "  {:<width$} {} {}\n",
                point.label,
                "█".repeat(filled).cyan(),
                point.value,
                width = label_width
            ));
        }
        output
    }

    /// Format any serializable view as pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the risk dashboard as JSON, including the current table page
    pub fn format_risk_json(state: &RiskDashboardState) -> String {
        let patients = state.patients();
        let value = json!({
            "stats": state.stats,
            "patient_risk_chart": state.patient_risk_chart,
            "recent_critical_chart": state.recent_critical_chart,
            "table": state.table,
            "risk_level": state.risk_level(),
            "risk_limit": state.risk_limit(),
            "page": patients.current_page(),
            "total_pages": patients.total_pages(),
            "total": patients.len(),
            "rows": state.visible_rows(),
        });
        Self::format_json(&value)
    }

    fn widget<T>(state: &WidgetState<T>, render: impl FnOnce(&T) -> String) -> String {
        match state {
            WidgetState::Ready(value) => render(value),
            WidgetState::Aborted => format!("  {}\n", SESSION_EXPIRED_MESSAGE.dimmed()),
            WidgetState::Failed(text) => format!("  {}\n", text.red()),
        }
    }

    fn format_summary(counts: &SummaryCounts) -> String {
        format!(
            "  {} {}   {} {}   {} {}   {} {}   {} {}\n",
            "Total:".bold(),
            counts.total,
            "Normal:".green().bold(),
            counts.normal,
            "Abnormal:".yellow().bold(),
            counts.abnormal,
            "Critical:".red().bold(),
            counts.critical,
            "Unknown:".dimmed(),
            counts.unknown
        )
    }

    fn format_top_tests(rows: &[TopTestRow]) -> String {
        if rows.is_empty() {
            return format!("  {}\n", "No data".dimmed());
        }
        let mut output = format!("  {:<28} {:<10} {:>8}\n", "Test", "Status", "Patients");
        for row in rows {
            output.push_str(&format!(
                "  {:<28} {:<10} {:>8}\n",
                row.test_name,
                Self::status_label(&row.status),
                row.patient_count
            ));
        }
        output
    }

    fn format_alerts(alerts: &CriticalAlerts) -> String {
        match alerts {
            CriticalAlerts::NonePending => {
                format!("  {}\n", CriticalAlerts::NONE_PENDING_MESSAGE.green())
            }
            CriticalAlerts::Items(lines) => lines
                .iter()
                .map(|line| format!("  {} {}\n", "!".red().bold(), line))
                .collect(),
        }
    }

    fn format_high_risk_table(state: &RiskDashboardState) -> String {
        match &state.table {
            None => format!("  {}\n", "Loading...".dimmed()),
            Some(WidgetState::Aborted) => format!("  {}\n", SESSION_EXPIRED_MESSAGE.dimmed()),
            // A failed reload keeps showing the cached list, with the error on top
            Some(WidgetState::Failed(text)) if state.patients().is_empty() => {
                format!("  {}\n", text.red())
            }
            Some(table) => {
                let mut output = String::new();
                if let WidgetState::Failed(text) = table {
                    output.push_str(&format!("  {}\n", text.red()));
                }
                let rows = state.visible_rows();
                if rows.is_empty() {
                    output.push_str(&format!("  {}\n", NO_HIGH_RISK_MESSAGE.dimmed()));
                } else {
                    output.push_str(&format!(
                        "  {:<10} {:<10} {:>10}  {:>8} {:>8} {:>8}\n",
                        "Subject", "Risk", "Confidence", "Normal", "Abnorm.", "Crit."
                    ));
                    for patient in rows {
                        output.push_str(&Self::format_patient_row(patient));
                    }
                }
                output.push_str(&Self::page_footer(state));
                output
            }
        }
    }

    fn format_patient_row(patient: &RiskPatient) -> String {
        let label = patient.risk_label.as_deref().unwrap_or_default();
        let probabilities = patient.probabilities_or_zero();
        format!(
            "  {:<10} {:<10} {:>9.1}%  {:>7.1}% {:>7.1}% {:>7.1}%\n",
            patient.subject_id,
            Self::status_label(label),
            patient.confidence_or_zero(),
            probabilities.normal,
            probabilities.abnormal,
            probabilities.critical
        )
    }

    fn page_footer(state: &RiskDashboardState) -> String {
        let patients = state.patients();
        let prev = if patients.has_prev() {
            "[p]rev".normal()
        } else {
            "[p]rev".dimmed()
        };
        let next = if patients.has_next() {
            "[n]ext".normal()
        } else {
            "[n]ext".dimmed()
        };
        format!("\n  {}   {}  {}\n", patients.page_info(), prev, next)
    }

    fn status_label(status: &str) -> ColoredString {
        match status.to_uppercase().as_str() {
            "CRITICAL" => status.red().bold(),
            "ABNORMAL" => status.yellow(),
            "NORMAL" => status.green(),
            _ => status.normal(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
