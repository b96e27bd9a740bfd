//! Alert domain - change detection across pool snapshots

mod alert_manager;
mod notification;

pub use alert_manager::{AlertManager, MAX_ALERT_HISTORY};
pub use notification::NotificationSink;
pub use crate::shared::types::AlertConfig;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighApr,
    VolumeSpike,
    TvlDrop,
    NewPool,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighApr => "high_apr",
            AlertType::VolumeSpike => "volume_spike",
            AlertType::TvlDrop => "tvl_drop",
            AlertType::NewPool => "new_pool",
        }
    }

    /// Prefix used in alert ids
    fn id_prefix(&self) -> &'static str {
        match self {
            AlertType::HighApr => "apr",
            AlertType::VolumeSpike => "vol",
            AlertType::TvlDrop => "tvl",
            AlertType::NewPool => "new",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Numeric evidence carried by an alert, one variant per alert type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertData {
    HighApr {
        apr: f64,
        tvl: f64,
    },
    VolumeSpike {
        previous_volume: f64,
        current_volume: f64,
        change_percent: f64,
    },
    TvlDrop {
        previous_tvl: f64,
        current_tvl: f64,
        drop_percent: f64,
    },
    NewPool {
        apr: f64,
        tvl: f64,
    },
}

impl AlertData {
    pub fn alert_type(&self) -> AlertType {
        match self {
            AlertData::HighApr { .. } => AlertType::HighApr,
            AlertData::VolumeSpike { .. } => AlertType::VolumeSpike,
            AlertData::TvlDrop { .. } => AlertType::TvlDrop,
            AlertData::NewPool { .. } => AlertType::NewPool,
        }
    }
}

/// Immutable alert emitted by [`AlertManager`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub pool_address: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub data: AlertData,
}

impl Alert {
    pub fn alert_type(&self) -> AlertType {
        self.data.alert_type()
    }
}
