//! Periodic refresh of the risk stat counters.
//!
//! Reloads the risk distribution, unreviewed critical summary and high-risk
//! count on a fixed interval (the patient table is left alone) and sends
//! each result over a channel. The first refresh happens one period after
//! start; the page load already fetched the initial values.

use super::load_risk_dashboard::{RiskDashboardUseCase, RiskStats};
use crate::config::dashboard::DEFAULT_REFRESH_INTERVAL;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct RiskStatsPoller {
    use_case: RiskDashboardUseCase,
    period: Duration,
}

impl RiskStatsPoller {
    pub fn new(use_case: RiskDashboardUseCase, period: Duration) -> Self {
        let period = if period.is_zero() {
            warn!(
                "Refresh interval must be positive, using {}s",
                DEFAULT_REFRESH_INTERVAL.as_secs()
            );
            DEFAULT_REFRESH_INTERVAL
        } else {
            period
        };
        Self { use_case, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until `cancel` fires or the receiver is dropped.
    pub async fn run(self, cancel: CancellationToken, updates: mpsc::Sender<RiskStats>) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Risk stat refresh cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    debug!("Refreshing risk stats");
                    let stats = self.use_case.refresh_stats().await;
                    if updates.send(stats).await.is_err() {
                        debug!("Risk stat receiver dropped, stopping refresh");
                        break;
                    }
                }
            }
        }
    }

    /// Spawn the poller as a tokio task.
    pub fn spawn(self, cancel: CancellationToken) -> (JoinHandle<()>, mpsc::Receiver<RiskStats>) {
        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(self.run(cancel, tx));
        (handle, rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;
    use labdash_domain::endpoints::{
        PREDICT_RISK_DISTRIBUTION, REPORTS_HIGH_RISK_PATIENTS, REPORTS_UNREVIEWED_CRITICAL_SUMMARY,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn poller(gateway: Arc<MockGateway>) -> RiskStatsPoller {
        RiskStatsPoller::new(
            RiskDashboardUseCase::new(gateway),
            Duration::from_secs(30),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_every_period() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_json(PREDICT_RISK_DISTRIBUTION, json!({"CRITICAL": 7}))
                .with_json(REPORTS_UNREVIEWED_CRITICAL_SUMMARY, json!({}))
                .with_json(REPORTS_HIGH_RISK_PATIENTS, json!({"critical_patients": 2})),
        );
        let cancel = CancellationToken::new();
        let start = Instant::now();
        let (handle, mut rx) = poller(gateway.clone()).spawn(cancel.clone());

        let first = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));
        assert_eq!(first.distribution.ready().unwrap().critical, 7);
        assert_eq!(first.high_risk_count.ready().unwrap().critical_patients, 2);

        rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(60));
        assert_eq!(gateway.request_count(PREDICT_RISK_DISTRIBUTION), 2);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_table_is_not_refreshed() {
        let gateway = Arc::new(MockGateway::new());
        let cancel = CancellationToken::new();
        let (handle, mut rx) = poller(gateway.clone()).spawn(cancel.clone());

        rx.recv().await.unwrap();
        cancel.cancel();
        handle.await.unwrap();

        let requested = gateway.requested.lock().unwrap();
        assert_eq!(requested.len(), 3);
        assert!(requested.iter().all(|p| !p.starts_with("/predict/high-risk")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_tick() {
        let gateway = Arc::new(MockGateway::new());
        let cancel = CancellationToken::new();
        let (handle, mut rx) = poller(gateway.clone()).spawn(cancel.clone());

        cancel.cancel();
        handle.await.unwrap();

        assert!(rx.recv().await.is_none());
        assert!(gateway.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_period_falls_back_to_default() {
        let poller = RiskStatsPoller::new(
            RiskDashboardUseCase::new(Arc::new(MockGateway::new())),
            Duration::ZERO,
        );
        assert_eq!(poller.period(), DEFAULT_REFRESH_INTERVAL);
    }
}
