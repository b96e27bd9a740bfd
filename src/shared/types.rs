//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Pool API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub price_api_url: String,
    pub timeout_ms: u64,
    pub price_cache_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dlmm-api.meteora.ag".to_string(),
            price_api_url: "https://api.coingecko.com/api/v3".to_string(),
            timeout_ms: 30000,
            price_cache_ttl_secs: 60,
        }
    }
}

/// Alert thresholds, read once per evaluation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub min_apr: f64,
    pub min_volume: f64,
    pub min_tvl: f64,
    /// Percent
    pub volume_spike_threshold: f64,
    /// Percent
    pub tvl_drop_threshold: f64,
    pub enabled: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_apr: 20.0,
            min_volume: 100_000.0,
            min_tvl: 500_000.0,
            volume_spike_threshold: 50.0,
            tvl_drop_threshold: 20.0,
            enabled: true,
        }
    }
}

/// Periodic monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub interval_secs: u64,
    pub history_limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            history_limit: 100,
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub alerts: AlertConfig,
    pub monitor: MonitorConfig,
}
