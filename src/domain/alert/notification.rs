//! Notification sink interface

use super::Alert;

/// Receives alerts for display or delivery
pub trait NotificationSink: Send + Sync {
    fn notify(&self, alert: &Alert);
}
