//! Yield domain - scoring and return projections for pools

mod yield_calculator;

pub use yield_calculator::YieldCalculator;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::pool::Pool;

/// Impermanent-loss risk bucket, derived from volume/TVL turnover
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpermanentLossRisk {
    Low,
    Medium,
    High,
}

impl ImpermanentLossRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpermanentLossRisk::Low => "low",
            ImpermanentLossRisk::Medium => "medium",
            ImpermanentLossRisk::High => "high",
        }
    }
}

impl fmt::Display for ImpermanentLossRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Projected returns of an investment into one pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldCalculation {
    pub pool: Pool,
    pub investment: f64,
    pub daily_yield: f64,
    pub monthly_yield: f64,
    pub yearly_yield: f64,
    pub impermanent_loss_risk: ImpermanentLossRisk,
}
