//! Load Risk Dashboard use case.
//!
//! Loads the ML risk dashboard: three stat counters, two charts and the
//! paginated high-risk patient table. The counters are also what the
//! periodic refresh reloads (see [`RiskStatsPoller`](super::poll_risk_stats::RiskStatsPoller)).

use super::load_dashboard::{CHART_ERROR, WidgetState, fetch_widget};
use crate::config::DashboardConfig;
use crate::ports::api_gateway::ApiGateway;
use labdash_domain::endpoints::{
    PREDICT_RISK_DISTRIBUTION, REPORTS_HIGH_RISK_PATIENTS, REPORTS_PATIENT_RISK,
    REPORTS_RECENT_CRITICAL, REPORTS_UNREVIEWED_CRITICAL_SUMMARY, high_risk_path,
};
use labdash_domain::{
    ChartSeries, DomainError, HighRiskCount, Paginator, RecentCritical, RiskDistribution,
    RiskPatient, UnreviewedSummary, charts, rows_from_value,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Error text of the stat counters.
pub const STAT_ERROR: &str = "N/A";
/// Error text of the high-risk patient table.
pub const HIGH_RISK_ERROR: &str = "Error loading risk predictions";
/// Shown when the current page has no displayable patient.
pub const NO_HIGH_RISK_MESSAGE: &str = "No high-risk patients found";

/// The periodically refreshed counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskStats {
    pub distribution: WidgetState<RiskDistribution>,
    pub unreviewed: WidgetState<UnreviewedSummary>,
    pub high_risk_count: WidgetState<HighRiskCount>,
}

impl RiskStats {
    pub fn session_expired(&self) -> bool {
        self.distribution.is_aborted()
            || self.unreviewed.is_aborted()
            || self.high_risk_count.is_aborted()
    }
}

/// View state of the risk dashboard page.
///
/// The high-risk patient list is cached here; paging only moves over the
/// cached list and never refetches.
#[derive(Debug, Clone)]
pub struct RiskDashboardState {
    pub stats: Option<RiskStats>,
    pub patient_risk_chart: Option<WidgetState<ChartSeries>>,
    pub recent_critical_chart: Option<WidgetState<ChartSeries>>,
    /// Load outcome of the table; `Ready` carries the number of patients.
    pub table: Option<WidgetState<usize>>,
    patients: Paginator<RiskPatient>,
    risk_level: u8,
    risk_limit: u32,
}

impl RiskDashboardState {
    pub fn new(config: &DashboardConfig) -> Result<Self, DomainError> {
        Ok(Self {
            stats: None,
            patient_risk_chart: None,
            recent_critical_chart: None,
            table: None,
            patients: Paginator::new(config.page_size)?,
            risk_level: config.risk_level,
            risk_limit: config.risk_limit,
        })
    }

    pub fn risk_level(&self) -> u8 {
        self.risk_level
    }

    pub fn set_risk_level(&mut self, level: u8) {
        self.risk_level = level;
    }

    pub fn risk_limit(&self) -> u32 {
        self.risk_limit
    }

    pub fn patients(&self) -> &Paginator<RiskPatient> {
        &self.patients
    }

    pub fn patients_mut(&mut self) -> &mut Paginator<RiskPatient> {
        &mut self.patients
    }

    /// Rows of the current page that carry a prediction.
    pub fn visible_rows(&self) -> Vec<&RiskPatient> {
        self.patients
            .page_items()
            .iter()
            .filter(|p| p.is_displayable())
            .collect()
    }

    pub fn session_expired(&self) -> bool {
        self.stats.as_ref().is_some_and(RiskStats::session_expired)
            || self.patient_risk_chart.as_ref().is_some_and(WidgetState::is_aborted)
            || self.recent_critical_chart.as_ref().is_some_and(WidgetState::is_aborted)
            || self.table.as_ref().is_some_and(WidgetState::is_aborted)
    }
}

#[derive(Clone)]
pub struct RiskDashboardUseCase {
    gateway: Arc<dyn ApiGateway>,
}

impl RiskDashboardUseCase {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Load every widget of the page.
    pub async fn load_all(&self, state: &mut RiskDashboardState) {
        let (stats, patient_risk, recent_critical) = tokio::join!(
            self.refresh_stats(),
            self.load_patient_risk_chart(),
            self.load_recent_critical_chart(),
        );
        state.stats = Some(stats);
        state.patient_risk_chart = Some(patient_risk);
        state.recent_critical_chart = Some(recent_critical);
        self.load_high_risk(state).await;
    }

    /// Reload the three stat counters.
    pub async fn refresh_stats(&self) -> RiskStats {
        let gateway = self.gateway.as_ref();
        let (distribution, unreviewed, high_risk_count) = tokio::join!(
            fetch_widget(gateway, PREDICT_RISK_DISTRIBUTION, STAT_ERROR),
            fetch_widget(gateway, REPORTS_UNREVIEWED_CRITICAL_SUMMARY, STAT_ERROR),
            fetch_widget(gateway, REPORTS_HIGH_RISK_PATIENTS, STAT_ERROR),
        );
        RiskStats {
            distribution: distribution.map(|v| RiskDistribution::from_value(&v)),
            unreviewed: unreviewed.map(|v| UnreviewedSummary::from_value(&v)),
            high_risk_count: high_risk_count.map(|v| HighRiskCount::from_value(&v)),
        }
    }

    async fn load_patient_risk_chart(&self) -> WidgetState<ChartSeries> {
        fetch_widget(self.gateway.as_ref(), REPORTS_PATIENT_RISK, CHART_ERROR)
            .await
            .map(|v| charts::patient_risk_chart(&RiskDistribution::from_value(&v)))
    }

    async fn load_recent_critical_chart(&self) -> WidgetState<ChartSeries> {
        fetch_widget(self.gateway.as_ref(), REPORTS_RECENT_CRITICAL, CHART_ERROR)
            .await
            .map(|v| charts::recent_critical_chart(&rows_from_value::<RecentCritical>(&v)))
    }

    /// Fetch the high-risk list for the state's risk level and reset to page 1.
    ///
    /// On failure the previously cached list stays in place.
    pub async fn load_high_risk(&self, state: &mut RiskDashboardState) {
        let path = high_risk_path(state.risk_level, state.risk_limit);
        let outcome = fetch_widget(self.gateway.as_ref(), &path, HIGH_RISK_ERROR).await;
        state.table = Some(match outcome {
            WidgetState::Ready(value) => {
                let patients: Vec<RiskPatient> = rows_from_value(&value);
                info!(
                    "Loaded {} high-risk patients (risk level {})",
                    patients.len(),
                    state.risk_level
                );
                let count = patients.len();
                state.patients.replace(patients);
                WidgetState::Ready(count)
            }
            WidgetState::Aborted => WidgetState::Aborted,
            WidgetState::Failed(text) => WidgetState::Failed(text),
        });
    }
}
