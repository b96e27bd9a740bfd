//! Stateful change detection over successive pool snapshots

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::pool::Pool;
use crate::shared::utils::short_address;
use super::{Alert, AlertConfig, AlertData, AlertSeverity, AlertType};

/// Upper bound on retained alert history
pub const MAX_ALERT_HISTORY: usize = 100;

/// Compares each pool batch against the last-seen snapshot per address and
/// keeps a bounded, most-recent-first alert history.
///
/// Not synchronized: callers driving it from several tasks must serialize
/// calls themselves.
#[derive(Debug)]
pub struct AlertManager {
    config: AlertConfig,
    previous_pools: HashMap<String, Pool>,
    alerts: Vec<Alert>,
    history_limit: usize,
    sequence: u64,
}

impl AlertManager {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            previous_pools: HashMap::new(),
            alerts: Vec::new(),
            history_limit: MAX_ALERT_HISTORY,
            sequence: 0,
        }
    }

    /// Retain fewer than [`MAX_ALERT_HISTORY`] alerts
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.min(MAX_ALERT_HISTORY);
        self
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Thresholds for the next cycle onwards
    pub fn set_config(&mut self, config: AlertConfig) {
        self.config = config;
    }

    /// Run all checks against `current_pools` and return only the alerts
    /// raised by this call. A disabled config is a no-op.
    pub fn check_pools(&mut self, current_pools: &[Pool]) -> Vec<Alert> {
        if !self.config.enabled {
            return Vec::new();
        }

        let now = Utc::now();
        let mut new_alerts = Vec::new();

        for pool in current_pools {
            if let Some(prev) = self.previous_pools.get(&pool.address) {
                let volume_alert = self.check_volume_spike(prev, pool);
                let tvl_alert = self.check_tvl_drop(prev, pool);
                new_alerts.extend(volume_alert);
                new_alerts.extend(tvl_alert);
            }

            if let Some(apr_alert) = self.check_high_apr(pool) {
                new_alerts.push(apr_alert);
            }

            self.previous_pools.insert(pool.address.clone(), pool.clone());
        }

        let new_alerts: Vec<Alert> = new_alerts
            .into_iter()
            .map(|(severity, message, data, address)| self.build_alert(address, severity, message, data, now))
            .collect();

        if !new_alerts.is_empty() {
            debug!("Raised {} alerts over {} pools", new_alerts.len(), current_pools.len());
        }

        let mut history = Vec::with_capacity(new_alerts.len() + self.alerts.len());
        history.extend(new_alerts.iter().cloned());
        history.append(&mut self.alerts);
        history.truncate(self.history_limit);
        self.alerts = history;

        new_alerts
    }

    /// Retained history, most recent first
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Empty the history; tracked pool snapshots are kept
    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
    }

    pub fn tracked_pool_count(&self) -> usize {
        self.previous_pools.len()
    }

    pub fn is_tracked(&self, address: &str) -> bool {
        self.previous_pools.contains_key(address)
    }

    fn check_volume_spike(&self, prev: &Pool, current: &Pool) -> Option<PendingAlert> {
        if prev.volume_24h == 0.0 {
            return None;
        }

        let change = (current.volume_24h - prev.volume_24h) / prev.volume_24h * 100.0;
        if change < self.config.volume_spike_threshold {
            return None;
        }

        let severity = if change > 100.0 { AlertSeverity::Critical } else { AlertSeverity::Warning };
        Some((
            severity,
            format!("{} volume increased {:.1}%", current.pair_name(), change),
            AlertData::VolumeSpike {
                previous_volume: prev.volume_24h,
                current_volume: current.volume_24h,
                change_percent: change,
            },
            current.address.clone(),
        ))
    }

    fn check_tvl_drop(&self, prev: &Pool, current: &Pool) -> Option<PendingAlert> {
        if prev.tvl == 0.0 {
            return None;
        }

        let drop = (prev.tvl - current.tvl) / prev.tvl * 100.0;
        if drop < self.config.tvl_drop_threshold {
            return None;
        }

        let severity = if drop > 50.0 { AlertSeverity::Critical } else { AlertSeverity::Warning };
        Some((
            severity,
            format!("{} TVL dropped {:.1}%", current.pair_name(), drop),
            AlertData::TvlDrop {
                previous_tvl: prev.tvl,
                current_tvl: current.tvl,
                drop_percent: drop,
            },
            current.address.clone(),
        ))
    }

    /// Fires once per address: only on the pool's first observation
    fn check_high_apr(&self, pool: &Pool) -> Option<PendingAlert> {
        if pool.apr < self.config.min_apr || self.previous_pools.contains_key(&pool.address) {
            return None;
        }

        let severity = if pool.apr > 100.0 {
            AlertSeverity::Critical
        } else if pool.apr > 50.0 {
            AlertSeverity::Warning
        } else {
            AlertSeverity::Info
        };
        Some((
            severity,
            format!("New high APR pool: {} at {:.1}% APR", pool.pair_name(), pool.apr),
            AlertData::HighApr { apr: pool.apr, tvl: pool.tvl },
            pool.address.clone(),
        ))
    }

    fn build_alert(
        &mut self,
        pool_address: String,
        severity: AlertSeverity,
        message: String,
        data: AlertData,
        timestamp: DateTime<Utc>,
    ) -> Alert {
        self.sequence += 1;
        let alert_type: AlertType = data.alert_type();
        let id = format!(
            "{}-{}-{}-{}",
            alert_type.id_prefix(),
            timestamp.timestamp_millis(),
            short_address(&pool_address, 8),
            self.sequence
        );

        Alert { id, pool_address, severity, timestamp, message, data }
    }
}

type PendingAlert = (AlertSeverity, String, AlertData, String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::test_pool;
    use std::collections::HashSet;

    fn config() -> AlertConfig {
        AlertConfig {
            min_apr: 20.0,
            min_volume: 100_000.0,
            min_tvl: 500_000.0,
            volume_spike_threshold: 50.0,
            tvl_drop_threshold: 20.0,
            enabled: true,
        }
    }

    fn pool_with(address: &str, apr: f64, tvl: f64, volume_24h: f64) -> Pool {
        let mut pool = test_pool(address);
        pool.apr = apr;
        pool.tvl = tvl;
        pool.volume_24h = volume_24h;
        pool
    }

    fn of_type(alerts: &[Alert], alert_type: AlertType) -> Vec<&Alert> {
        alerts.iter().filter(|a| a.alert_type() == alert_type).collect()
    }

    #[test]
    fn test_high_apr_on_first_observation() {
        let mut manager = AlertManager::new(config());

        let alerts = manager.check_pools(&[pool_with("test123", 85.0, 1_000_000.0, 500_000.0)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type(), AlertType::HighApr);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].pool_address, "test123");
        assert_eq!(alerts[0].message, "New high APR pool: SOL-USDC at 85.0% APR");
        assert_eq!(alerts[0].data, AlertData::HighApr { apr: 85.0, tvl: 1_000_000.0 });
    }

    #[test]
    fn test_high_apr_severity_boundaries() {
        let mut manager = AlertManager::new(config());
        let alerts = manager.check_pools(&[
            pool_with("p50", 50.0, 1_000_000.0, 0.0),
            pool_with("p100", 100.0, 1_000_000.0, 0.0),
            pool_with("p150", 150.0, 1_000_000.0, 0.0),
            pool_with("p20", 20.0, 1_000_000.0, 0.0),
            pool_with("p10", 10.0, 1_000_000.0, 0.0),
        ]);

        let severities: Vec<(&str, AlertSeverity)> =
            alerts.iter().map(|a| (a.pool_address.as_str(), a.severity)).collect();
        assert_eq!(
            severities,
            vec![
                ("p50", AlertSeverity::Info),
                ("p100", AlertSeverity::Warning),
                ("p150", AlertSeverity::Critical),
                ("p20", AlertSeverity::Info),
            ]
        );
    }

    #[test]
    fn test_unchanged_pool_does_not_refire() {
        let mut manager = AlertManager::new(config());
        let pool = pool_with("test123", 85.0, 1_000_000.0, 500_000.0);

        assert_eq!(manager.check_pools(&[pool.clone()]).len(), 1);
        assert!(manager.check_pools(&[pool]).is_empty());
    }

    #[test]
    fn test_apr_rising_on_tracked_pool_does_not_fire() {
        let mut manager = AlertManager::new(config());

        assert!(manager.check_pools(&[pool_with("test123", 5.0, 1_000_000.0, 500_000.0)]).is_empty());
        let alerts = manager.check_pools(&[pool_with("test123", 90.0, 1_000_000.0, 500_000.0)]);
        assert!(of_type(&alerts, AlertType::HighApr).is_empty());
    }

    #[test]
    fn test_volume_spike_at_100_percent_is_warning() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[pool_with("test123", 50.0, 1_000_000.0, 100_000.0)]);

        let alerts = manager.check_pools(&[pool_with("test123", 50.0, 1_000_000.0, 200_000.0)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].message, "SOL-USDC volume increased 100.0%");
        assert_eq!(
            alerts[0].data,
            AlertData::VolumeSpike { previous_volume: 100_000.0, current_volume: 200_000.0, change_percent: 100.0 }
        );
    }

    #[test]
    fn test_volume_spike_above_100_percent_is_critical() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[pool_with("test123", 50.0, 1_000_000.0, 100_000.0)]);

        let alerts = manager.check_pools(&[pool_with("test123", 50.0, 1_000_000.0, 210_000.0)]);
        let spikes = of_type(&alerts, AlertType::VolumeSpike);
        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_volume_below_threshold_or_zero_baseline() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[
            pool_with("small", 5.0, 1_000_000.0, 100_000.0),
            pool_with("zero", 5.0, 1_000_000.0, 0.0),
        ]);

        let alerts = manager.check_pools(&[
            pool_with("small", 5.0, 1_000_000.0, 149_000.0),
            pool_with("zero", 5.0, 1_000_000.0, 900_000.0),
        ]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_tvl_drop() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[pool_with("test123", 50.0, 1_000_000.0, 500_000.0)]);

        let alerts = manager.check_pools(&[pool_with("test123", 50.0, 700_000.0, 500_000.0)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type(), AlertType::TvlDrop);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        match &alerts[0].data {
            AlertData::TvlDrop { previous_tvl, current_tvl, drop_percent } => {
                assert_eq!(*previous_tvl, 1_000_000.0);
                assert_eq!(*current_tvl, 700_000.0);
                assert!((drop_percent - 30.0).abs() < 1e-9);
            }
            other => panic!("unexpected data {:?}", other),
        }
    }

    #[test]
    fn test_tvl_drop_critical_and_zero_baseline() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[
            pool_with("big", 5.0, 1_000_000.0, 0.0),
            pool_with("empty", 5.0, 0.0, 0.0),
        ]);

        let alerts = manager.check_pools(&[
            pool_with("big", 5.0, 400_000.0, 0.0),
            pool_with("empty", 5.0, 0.0, 0.0),
        ]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].pool_address, "big");
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_checks_are_independent() {
        let mut manager = AlertManager::new(config());
        manager.check_pools(&[pool_with("test123", 5.0, 1_000_000.0, 100_000.0)]);

        let alerts = manager.check_pools(&[
            pool_with("test123", 5.0, 500_000.0, 300_000.0),
            pool_with("fresh", 60.0, 200_000.0, 1_000.0),
        ]);
        let types: Vec<AlertType> = alerts.iter().map(Alert::alert_type).collect();
        assert_eq!(types, vec![AlertType::VolumeSpike, AlertType::TvlDrop, AlertType::HighApr]);
    }

    #[test]
    fn test_batch_order_does_not_change_results() {
        let first = vec![
            pool_with("pool1", 85.0, 1_000_000.0, 100_000.0),
            pool_with("pool2", 10.0, 2_000_000.0, 400_000.0),
            pool_with("pool3", 150.0, 600_000.0, 50_000.0),
        ];
        let second = vec![
            pool_with("pool1", 85.0, 700_000.0, 210_000.0),
            pool_with("pool2", 10.0, 800_000.0, 700_000.0),
            pool_with("pool3", 150.0, 600_000.0, 50_000.0),
            pool_with("pool4", 60.0, 900_000.0, 0.0),
        ];

        let outcome = |reverse: bool| {
            let mut manager = AlertManager::new(config());
            let mut keys = Vec::new();
            for batch in [&first, &second] {
                let mut batch = batch.clone();
                if reverse {
                    batch.reverse();
                }
                keys.extend(
                    manager
                        .check_pools(&batch)
                        .into_iter()
                        .map(|a| (a.alert_type().as_str(), a.pool_address.clone(), a.severity)),
                );
            }
            keys.sort();
            keys
        };

        let forward = outcome(false);
        assert_eq!(forward.len(), 7);
        assert_eq!(forward, outcome(true));
    }

    #[test]
    fn test_disabled_config_is_noop() {
        let mut manager = AlertManager::new(AlertConfig { enabled: false, ..config() });

        assert!(manager.check_pools(&[pool_with("test123", 85.0, 1_000_000.0, 0.0)]).is_empty());
        assert_eq!(manager.tracked_pool_count(), 0);
        assert!(manager.alerts().is_empty());

        manager.set_config(config());
        assert_eq!(manager.check_pools(&[pool_with("test123", 85.0, 1_000_000.0, 0.0)]).len(), 1);
    }

    #[test]
    fn test_clear_alerts_keeps_snapshots() {
        let mut manager = AlertManager::new(config());
        let pool = pool_with("test123", 85.0, 1_000_000.0, 500_000.0);

        manager.check_pools(&[pool.clone()]);
        assert_eq!(manager.alerts().len(), 1);

        manager.clear_alerts();
        assert!(manager.alerts().is_empty());
        assert!(manager.is_tracked("test123"));

        assert!(manager.check_pools(&[pool]).is_empty());
        assert!(manager.alerts().is_empty());
    }

    #[test]
    fn test_history_is_bounded_and_most_recent_first() {
        let mut manager = AlertManager::new(config());

        for cycle in 0..150 {
            let alerts = manager.check_pools(&[pool_with(&format!("pool{}", cycle), 85.0, 1_000_000.0, 0.0)]);
            assert_eq!(alerts.len(), 1);
            assert!(manager.alerts().len() <= MAX_ALERT_HISTORY);
        }

        let history = manager.alerts();
        assert_eq!(history.len(), MAX_ALERT_HISTORY);
        assert_eq!(history[0].pool_address, "pool149");
        assert_eq!(history[MAX_ALERT_HISTORY - 1].pool_address, "pool50");
    }

    #[test]
    fn test_history_limit_cannot_exceed_cap() {
        let mut manager = AlertManager::new(config()).with_history_limit(3);
        for cycle in 0..5 {
            manager.check_pools(&[pool_with(&format!("pool{}", cycle), 85.0, 1_000_000.0, 0.0)]);
        }
        assert_eq!(manager.alerts().len(), 3);

        let manager = AlertManager::new(config()).with_history_limit(1000);
        assert_eq!(manager.history_limit, MAX_ALERT_HISTORY);
    }

    #[test]
    fn test_alert_ids_are_unique() {
        let mut manager = AlertManager::new(config());
        // Same 8-char prefix, raised within the same cycle
        let pools: Vec<Pool> = (0..20)
            .map(|i| pool_with(&format!("samepref{}", i), 85.0, 1_000_000.0, 0.0))
            .collect();

        let alerts = manager.check_pools(&pools);
        assert_eq!(alerts.len(), 20);

        let ids: HashSet<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
        assert!(alerts.iter().all(|a| a.id.starts_with("apr-") && a.id.contains("-samepref-")));
    }
}
