//! Alert delivery through the tracing log

use tracing::{error, info, warn};

use crate::domain::alert::{Alert, AlertSeverity, NotificationSink};

/// Logs each alert at a level matching its severity
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for LogNotifier {
    fn notify(&self, alert: &Alert) {
        let alert_type = alert.alert_type();
        match alert.severity {
            AlertSeverity::Critical => error!(
                id = %alert.id, pool = %alert.pool_address, kind = %alert_type,
                "🔴 {}", alert.message
            ),
            AlertSeverity::Warning => warn!(
                id = %alert.id, pool = %alert.pool_address, kind = %alert_type,
                "🟡 {}", alert.message
            ),
            AlertSeverity::Info => info!(
                id = %alert.id, pool = %alert.pool_address, kind = %alert_type,
                "🔵 {}", alert.message
            ),
        }
    }
}
