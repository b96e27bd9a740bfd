use crate::domain::alert::{Alert, AlertManager, NotificationSink};
use crate::domain::pool::PoolDataSource;
use crate::domain::yields::YieldCalculator;
use crate::shared::errors::AppError;
use crate::shared::types::{AlertConfig, MonitorConfig};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{interval, sleep_until, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Monitoring statistics
#[derive(Debug, Clone)]
pub struct MonitorStats {
    pub start_time: Instant,
    pub cycles_run: u64,
    pub failed_fetches: u64,
    pub skipped_cycles: u64,
    pub pools_seen: usize,
    pub alerts_emitted: u64,
    pub last_update: Option<DateTime<Utc>>,
}

impl MonitorStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            cycles_run: 0,
            failed_fetches: 0,
            skipped_cycles: 0,
            pools_seen: 0,
            alerts_emitted: 0,
            last_update: None,
        }
    }

    pub fn update(&mut self) {
        self.last_update = Some(Utc::now());
    }

    pub fn get_uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn get_alerts_per_minute(&self) -> f64 {
        let uptime_minutes = self.get_uptime().as_secs_f64() / 60.0;
        if uptime_minutes > 0.0 {
            self.alerts_emitted as f64 / uptime_minutes
        } else {
            0.0
        }
    }

    pub fn print_summary(&self) {
        info!("📊 Monitor statistics:");
        info!("   Uptime: {}s", self.get_uptime().as_secs());
        info!("   Cycles: {} ({} failed fetches, {} skipped)", self.cycles_run, self.failed_fetches, self.skipped_cycles);
        info!("   Pools in last batch: {}", self.pools_seen);
        info!("   Alerts: {} ({:.2}/min)", self.alerts_emitted, self.get_alerts_per_minute());
    }
}

impl Default for MonitorStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic driver: fetch, score, run change detection, notify
pub struct AlertMonitor {
    source: Arc<dyn PoolDataSource>,
    sink: Arc<dyn NotificationSink>,
    manager: AlertManager,
    interval: Duration,
    stats: MonitorStats,
}

impl AlertMonitor {
    pub fn new(
        source: Arc<dyn PoolDataSource>,
        sink: Arc<dyn NotificationSink>,
        alert_config: AlertConfig,
        monitor_config: &MonitorConfig,
    ) -> Self {
        Self {
            source,
            sink,
            manager: AlertManager::new(alert_config).with_history_limit(monitor_config.history_limit),
            interval: Duration::from_secs(monitor_config.interval_secs.max(1)),
            stats: MonitorStats::new(),
        }
    }

    /// Override the cycle interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn manager(&self) -> &AlertManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut AlertManager {
        &mut self.manager
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Run one cycle and return the alerts it raised. A failed fetch or an
    /// empty batch leaves the tracked snapshots untouched.
    pub async fn run_cycle(&mut self) -> Vec<Alert> {
        self.stats.cycles_run += 1;

        let pools = match self.source.fetch_pools().await {
            Ok(pools) => pools,
            Err(e) => {
                warn!("⚠️ Pool fetch failed, skipping cycle: {}", e);
                self.stats.failed_fetches += 1;
                return Vec::new();
            }
        };

        if pools.is_empty() {
            debug!("Empty pool batch, skipping cycle");
            self.stats.skipped_cycles += 1;
            return Vec::new();
        }

        let scored = YieldCalculator::score_pools(&pools);
        self.stats.pools_seen = scored.len();

        let alerts = self.manager.check_pools(&scored);
        for alert in &alerts {
            self.sink.notify(alert);
        }

        self.stats.alerts_emitted += alerts.len() as u64;
        self.stats.update();
        debug!(
            "Cycle {}: {} pools, {} new alerts, {} tracked",
            self.stats.cycles_run,
            scored.len(),
            alerts.len(),
            self.manager.tracked_pool_count()
        );
        alerts
    }

    /// Run cycles on a fixed interval, first one immediately, until
    /// `duration` elapses or Ctrl-C.
    pub async fn run(&mut self, duration: Option<Duration>) -> Result<(), AppError> {
        self.run_until(duration, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("⚠️ Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run) with a caller-supplied shutdown signal.
    /// A cycle still in flight when the deadline or shutdown fires is
    /// abandoned.
    pub async fn run_until<F>(&mut self, duration: Option<Duration>, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()>,
    {
        info!("🚀 Starting alert monitor, interval {}s", self.interval.as_secs_f64());

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = duration.map(|d| tokio::time::Instant::now() + d);

        let stop = async move {
            tokio::select! {
                _ = wait_until(deadline) => "⏱️  Monitor duration elapsed",
                _ = shutdown => "🛑 Interrupted, stopping monitor",
            }
        };
        tokio::pin!(stop);

        let reason = 'monitor: loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = self.run_cycle() => {}
                        reason = &mut stop => break 'monitor reason,
                    }
                }
                reason = &mut stop => break 'monitor reason,
            }
        };

        info!("{}", reason);
        self.stats.print_summary();
        Ok(())
    }
}

async fn wait_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
