//! Application services and use cases

use crate::domain::pool::{Pool, PoolDataSource, PoolManager, PoolQuery};
use crate::domain::yields::{YieldCalculation, YieldCalculator};
use crate::shared::errors::{AppError, PoolError};
use std::sync::Arc;
use tracing::info;

/// Fetches, scores and serves the latest pool snapshot
pub struct DashboardService {
    source: Arc<dyn PoolDataSource>,
    pools: PoolManager,
}

impl DashboardService {
    pub fn new(source: Arc<dyn PoolDataSource>) -> Self {
        Self {
            source,
            pools: PoolManager::new(),
        }
    }

    /// Replace the snapshot with a freshly scored batch
    pub async fn refresh(&mut self) -> Result<usize, AppError> {
        let pools = self.source.fetch_pools().await?;
        let scored = YieldCalculator::score_pools(&pools);
        info!("📥 Loaded {} pools", scored.len());

        let count = scored.len();
        self.pools.replace_pools(scored);
        Ok(count)
    }

    pub fn pools(&self) -> &[Pool] {
        self.pools.pools()
    }

    pub fn ranked(&self, query: &PoolQuery) -> Vec<&Pool> {
        self.pools.query(query)
    }

    pub fn pool(&self, address: &str) -> Result<&Pool, PoolError> {
        self.pools
            .find_by_address(address)
            .ok_or_else(|| PoolError::PoolNotFound(address.to_string()))
    }

    /// Projected returns of `investment` into the pool at `address`
    pub fn project(&self, address: &str, investment: f64) -> Result<YieldCalculation, PoolError> {
        let pool = self.pool(address)?;
        Ok(YieldCalculator::calculate_yields(pool, investment))
    }
}
