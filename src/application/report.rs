//! Printable and JSON views of the pool dashboard
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::alert::Alert;
use crate::domain::pool::Pool;
use crate::domain::yields::YieldCalculation;
use crate::shared::utils::{format_currency, format_percentage, short_address};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolReport {
    pub generated_at: DateTime<Utc>,
    pub total_pools: usize,
    pub rows: Vec<PoolRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRow {
    pub address: String,
    pub pair: String,
    pub tvl: f64,
    pub volume_24h: f64,
    pub apr: f64,
    pub apy: f64,
    pub yield_score: f64,
    pub bin_step: f64,
    pub base_fee: f64,
}

impl From<&Pool> for PoolRow {
    fn from(pool: &Pool) -> Self {
        Self {
            address: pool.address.clone(),
            pair: pool.pair_name(),
            tvl: pool.tvl,
            volume_24h: pool.volume_24h,
            apr: pool.apr,
            apy: pool.apy.unwrap_or(0.0),
            yield_score: pool.yield_score.unwrap_or(0.0),
            bin_step: pool.bin_step,
            base_fee: pool.base_fee,
        }
    }
}

impl PoolReport {
    /// Report over `rows` out of `total_pools` loaded
    pub fn new(rows: &[&Pool], total_pools: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            total_pools,
            rows: rows.iter().map(|pool| PoolRow::from(*pool)).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width table, one line per pool
    pub fn to_table(&self) -> String {
        let mut out = format!(
            "{:<4} {:<14} {:<14} {:>12} {:>12} {:>10} {:>10} {:>10}\n",
            "#", "Pair", "Address", "TVL", "Volume 24h", "APR", "APY", "Score"
        );
        for (i, row) in self.rows.iter().enumerate() {
            out.push_str(&format!(
                "{:<4} {:<14} {:<14} {:>12} {:>12} {:>10} {:>10} {:>10.2}\n",
                i + 1,
                row.pair,
                short_address(&row.address, 12),
                format_currency(row.tvl),
                format_currency(row.volume_24h),
                format_percentage(row.apr, 2),
                format_percentage(row.apy, 2),
                row.yield_score,
            ));
        }
        out.push_str(&format!("Showing {} of {} pools\n", self.rows.len(), self.total_pools));
        out
    }
}

/// Multi-line summary of a return projection
pub fn render_projection(calc: &YieldCalculation) -> String {
    let pool = &calc.pool;
    [
        format!("Pool:        {} ({})", pool.pair_name(), pool.address),
        format!("TVL:         {}", format_currency(pool.tvl)),
        format!("Volume 24h:  {}", format_currency(pool.volume_24h)),
        format!("APR / APY:   {} / {}", format_percentage(pool.apr, 2), format_percentage(pool.apy.unwrap_or(0.0), 2)),
        format!("Bin step:    {}  Base fee: {}", pool.bin_step, format_percentage(pool.base_fee, 2)),
        format!("Investment:  {}", format_currency(calc.investment)),
        format!("Daily:       {}", format_currency(calc.daily_yield)),
        format!("Monthly:     {}", format_currency(calc.monthly_yield)),
        format!("Yearly:      {}", format_currency(calc.yearly_yield)),
        format!("IL risk:     {}", calc.impermanent_loss_risk),
    ]
    .join("\n")
}

/// One line per alert: time, severity, type, message
pub fn render_alert(alert: &Alert) -> String {
    format!(
        "[{}] {:<8} {:<12} {}",
        alert.timestamp.format("%Y-%m-%d %H:%M:%S"),
        alert.severity,
        alert.alert_type(),
        alert.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::{AlertData, AlertSeverity};
    use crate::domain::pool::test_pool;
    use crate::domain::yields::YieldCalculator;

    #[test]
    fn test_pool_report_json() {
        let scored = YieldCalculator::score_pools(&[test_pool("pool1")]);
        let report = PoolReport::new(&[&scored[0]], 3);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["totalPools"], 3);
        assert_eq!(json["rows"][0]["pair"], "SOL-USDC");
        assert_eq!(json["rows"][0]["yieldScore"], 285.0);
    }

    #[test]
    fn test_pool_report_table() {
        let pool = test_pool("pool1");
        let table = PoolReport::new(&[&pool], 1).to_table();

        assert!(table.contains("SOL-USDC"));
        assert!(table.contains("$1.00M"));
        assert!(table.contains("$500.00K"));
        assert!(table.contains("50.00%"));
        assert!(table.ends_with("Showing 1 of 1 pools\n"));
    }

    #[test]
    fn test_render_projection() {
        let calc = YieldCalculator::calculate_yields(&test_pool("pool1"), 1000.0);
        let text = render_projection(&calc);
        assert!(text.contains("Yearly:      $500.00"));
        assert!(text.contains("IL risk:     medium"));
    }

    #[test]
    fn test_render_alert() {
        let alert = Alert {
            id: "tvl-1-pool1-1".to_string(),
            pool_address: "pool1".to_string(),
            severity: AlertSeverity::Warning,
            timestamp: Utc::now(),
            message: "SOL-USDC TVL dropped 30.0%".to_string(),
            data: AlertData::TvlDrop { previous_tvl: 1e6, current_tvl: 7e5, drop_percent: 30.0 },
        };
        let line = render_alert(&alert);
        assert!(line.contains("warning"));
        assert!(line.contains("tvl_drop"));
        assert!(line.ends_with("SOL-USDC TVL dropped 30.0%"));
    }
}
