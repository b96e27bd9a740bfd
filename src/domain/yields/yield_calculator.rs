//! Yield score, APY and return projections

use crate::domain::pool::Pool;
use crate::shared::utils::round2;
use super::{ImpermanentLossRisk, YieldCalculation};

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Weight of volume/TVL turnover in the yield score
const VOLUME_RATIO_WEIGHT: f64 = 10.0;

/// Stateless yield computations
pub struct YieldCalculator;

impl YieldCalculator {
    /// Rank a pool by APR boosted by turnover and weighted by TVL size.
    /// Returns 0 for a pool with no TVL.
    pub fn calculate_yield_score(pool: &Pool) -> f64 {
        if pool.tvl == 0.0 {
            return 0.0;
        }

        let volume_ratio = pool.volume_24h / pool.tvl;
        let tvl_factor = Self::tvl_factor(pool.tvl);

        let score = pool.apr * (1.0 + volume_ratio * VOLUME_RATIO_WEIGHT) * tvl_factor;
        round2(score)
    }

    /// Step function favouring the $100k - $1M range
    pub fn tvl_factor(tvl: f64) -> f64 {
        match tvl {
            t if t < 50_000.0 => 0.5,
            t if t < 100_000.0 => 0.8,
            t if t < 1_000_000.0 => 1.0,
            t if t < 10_000_000.0 => 0.95,
            t if t < 50_000_000.0 => 0.9,
            _ => 0.85,
        }
    }

    /// Project simple-interest returns of `investment` at the pool's APR
    pub fn calculate_yields(pool: &Pool, investment: f64) -> YieldCalculation {
        let rate = pool.apr / 100.0;
        let daily_yield = investment * rate / DAYS_PER_YEAR;

        YieldCalculation {
            pool: pool.clone(),
            investment,
            daily_yield,
            monthly_yield: daily_yield * DAYS_PER_MONTH,
            yearly_yield: investment * rate,
            impermanent_loss_risk: Self::estimate_impermanent_loss_risk(pool),
        }
    }

    /// Higher turnover means more price movement through the bins
    pub fn estimate_impermanent_loss_risk(pool: &Pool) -> ImpermanentLossRisk {
        let volume_ratio = pool.volume_ratio();

        if volume_ratio > 0.5 {
            ImpermanentLossRisk::High
        } else if volume_ratio > 0.2 {
            ImpermanentLossRisk::Medium
        } else {
            ImpermanentLossRisk::Low
        }
    }

    /// Daily-compounded APY for a simple APR, both in percent
    pub fn calculate_apy(apr: f64) -> f64 {
        let daily_rate = apr / 100.0 / DAYS_PER_YEAR;
        let apy = ((1.0 + daily_rate).powf(DAYS_PER_YEAR) - 1.0) * 100.0;
        round2(apy)
    }

    /// Copies of `pools` with `yield_score` and `apy` filled in
    pub fn score_pools(pools: &[Pool]) -> Vec<Pool> {
        pools
            .iter()
            .map(|pool| {
                let mut scored = pool.clone();
                scored.yield_score = Some(Self::calculate_yield_score(pool));
                if scored.apy.is_none() {
                    scored.apy = Some(Self::calculate_apy(pool.apr));
                }
                scored
            })
            .collect()
    }
}
