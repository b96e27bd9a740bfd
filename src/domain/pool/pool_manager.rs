//! Pool manager for the latest pool snapshot

use std::cmp::Ordering;
use std::str::FromStr;

use super::Pool;

/// Dashboard sort order, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Yield,
    Apr,
    Tvl,
    Volume,
}

impl SortKey {
    fn value(&self, pool: &Pool) -> f64 {
        match self {
            SortKey::Yield => pool.yield_score.unwrap_or(0.0),
            SortKey::Apr => pool.apr,
            SortKey::Tvl => pool.tvl,
            SortKey::Volume => pool.volume_24h,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yield" => Ok(SortKey::Yield),
            "apr" => Ok(SortKey::Apr),
            "tvl" => Ok(SortKey::Tvl),
            "volume" => Ok(SortKey::Volume),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Pool filter criteria
#[derive(Debug, Clone, Default)]
pub struct PoolQuery {
    pub min_apr: f64,
    pub min_tvl: f64,
    /// Exact symbol on either side
    pub token: Option<String>,
    /// Case-insensitive substring of "X-Y"
    pub search: Option<String>,
    pub sort_by: SortKey,
    pub limit: Option<usize>,
}

/// Holds the latest pool snapshot and answers queries over it
#[derive(Debug, Default)]
pub struct PoolManager {
    pools: Vec<Pool>,
}

impl PoolManager {
    pub fn new() -> Self {
        Self { pools: Vec::new() }
    }

    pub fn replace_pools(&mut self, pools: Vec<Pool>) {
        self.pools = pools;
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn find_by_address(&self, address: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.address == address)
    }

    /// Pools holding `symbol` on either side, case-insensitive
    pub fn find_by_token(&self, symbol: &str) -> Vec<&Pool> {
        self.pools.iter().filter(|p| p.has_token(symbol)).collect()
    }

    /// Filter and rank pools
    pub fn query(&self, query: &PoolQuery) -> Vec<&Pool> {
        let search = query.search.as_ref().map(|s| s.to_lowercase());

        let mut result: Vec<&Pool> = self
            .pools
            .iter()
            .filter(|pool| pool.apr >= query.min_apr && pool.tvl >= query.min_tvl)
            .filter(|pool| match &query.token {
                Some(token) if !token.is_empty() => {
                    pool.token_x.symbol == *token || pool.token_y.symbol == *token
                }
                _ => true,
            })
            .filter(|pool| match &search {
                Some(search) => pool.pair_name().to_lowercase().contains(search.as_str()),
                None => true,
            })
            .collect();

        result.sort_by(|a, b| {
            query
                .sort_by
                .value(b)
                .partial_cmp(&query.sort_by.value(a))
                .unwrap_or(Ordering::Equal)
        });

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }
        result
    }
}
