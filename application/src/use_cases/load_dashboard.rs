//! Load Dashboard use case.
//!
//! Loads the widgets of the lab dashboard page concurrently. Each widget
//! makes its own request and ends up in its own [`WidgetState`]; a failing
//! widget never affects the others.

use crate::ports::api_gateway::ApiGateway;
use labdash_domain::endpoints::{
    REPORTS_BY_GENDER, REPORTS_BY_LAB, REPORTS_SUMMARY, REPORTS_UNREVIEWED_CRITICAL,
};
use labdash_domain::{
    ChartSeries, CriticalAlerts, GenderRow, LabRow, StatusCount, SummaryCounts, TopTestRow,
    charts, rows_from_value, top_tests,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Error text of the summary counters.
pub const SUMMARY_ERROR: &str = "Error";
/// Error text of the top tests table.
pub const TOP_TESTS_ERROR: &str = "Error loading data";
/// Error text of the critical alerts panel.
pub const ALERTS_ERROR: &str = "Error loading alerts";
/// Error text of a chart panel.
pub const CHART_ERROR: &str = "Error loading chart";

/// Load outcome of one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum WidgetState<T> {
    /// Loaded and converted.
    Ready(T),
    /// The request was rejected as unauthorized; the session has been cleared.
    Aborted,
    /// The request failed; carries the widget's fixed error text.
    Failed(String),
}

impl<T> WidgetState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            WidgetState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, WidgetState::Aborted)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WidgetState<U> {
        match self {
            WidgetState::Ready(value) => WidgetState::Ready(f(value)),
            WidgetState::Aborted => WidgetState::Aborted,
            WidgetState::Failed(text) => WidgetState::Failed(text),
        }
    }
}

/// GET `path` and classify the outcome for a widget.
pub(crate) async fn fetch_widget(
    gateway: &dyn ApiGateway,
    path: &str,
    error_text: &str,
) -> WidgetState<Value> {
    match gateway.get_json(path).await {
        Ok(Some(value)) => {
            debug!("Loaded {}", path);
            WidgetState::Ready(value)
        }
        Ok(None) => {
            debug!("Loading {} aborted by the gateway", path);
            WidgetState::Aborted
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path, e);
            WidgetState::Failed(error_text.to_string())
        }
    }
}

/// All widgets of the lab dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabDashboard {
    pub summary: WidgetState<SummaryCounts>,
    pub lab_chart: WidgetState<ChartSeries>,
    pub gender_chart: WidgetState<ChartSeries>,
    pub status_chart: WidgetState<ChartSeries>,
    pub top_tests: WidgetState<Vec<TopTestRow>>,
    pub alerts: WidgetState<CriticalAlerts>,
}

impl LabDashboard {
    /// Whether any widget was aborted by an expired session.
    pub fn session_expired(&self) -> bool {
        self.summary.is_aborted()
            || self.lab_chart.is_aborted()
            || self.gender_chart.is_aborted()
            || self.status_chart.is_aborted()
            || self.top_tests.is_aborted()
            || self.alerts.is_aborted()
    }
}

pub struct LoadDashboardUseCase {
    gateway: Arc<dyn ApiGateway>,
}

impl LoadDashboardUseCase {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self) -> LabDashboard {
        let gateway = self.gateway.as_ref();
        let (summary, lab_chart, gender_chart, status_chart, top, alerts) = tokio::join!(
            fetch_widget(gateway, REPORTS_SUMMARY, SUMMARY_ERROR),
            fetch_widget(gateway, REPORTS_BY_LAB, CHART_ERROR),
            fetch_widget(gateway, REPORTS_BY_GENDER, CHART_ERROR),
            fetch_widget(gateway, REPORTS_SUMMARY, CHART_ERROR),
            fetch_widget(gateway, REPORTS_BY_LAB, TOP_TESTS_ERROR),
            fetch_widget(gateway, REPORTS_UNREVIEWED_CRITICAL, ALERTS_ERROR),
        );

        LabDashboard {
            summary: summary
                .map(|v| SummaryCounts::from_rows(&rows_from_value::<StatusCount>(&v))),
            lab_chart: lab_chart.map(|v| charts::lab_chart(&rows_from_value::<LabRow>(&v))),
            gender_chart: gender_chart
                .map(|v| charts::gender_chart(&rows_from_value::<GenderRow>(&v))),
            status_chart: status_chart
                .map(|v| charts::status_chart(&rows_from_value::<StatusCount>(&v))),
            top_tests: top.map(|v| top_tests(&rows_from_value::<LabRow>(&v))),
            alerts: alerts.map(|v| CriticalAlerts::from_value(&v)),
        }
    }
}
