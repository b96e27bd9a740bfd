//! Pool domain - canonical DLMM pool snapshots

mod pool_manager;
mod pool_normalizer;
mod pool_source;

pub use pool_manager::{PoolManager, PoolQuery, SortKey};
pub use pool_normalizer::PoolNormalizer;
pub use pool_source::PoolDataSource;

use serde::{Deserialize, Serialize};

/// Default token precision when upstream omits it
pub const DEFAULT_TOKEN_DECIMALS: u8 = 9;

/// Token side of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub mint: String,
    pub decimals: u8,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            symbol: "Unknown".to_string(),
            mint: String::new(),
            decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }
}

/// Canonical pool snapshot, keyed by `address` across snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub address: String,
    pub name: Option<String>,
    pub token_x: TokenInfo,
    pub token_y: TokenInfo,
    pub bin_step: f64,
    pub base_fee: f64,
    pub tvl: f64,
    pub volume_24h: f64,
    /// Simple, non-compounded annual rate in percent
    pub apr: f64,
    pub yield_score: Option<f64>,
    pub volume_7d: Option<f64>,
    pub fees_24h: Option<f64>,
    pub apy: Option<f64>,
    pub price: Option<f64>,
    pub liquidity: Option<f64>,
    pub is_verified: bool,
}

impl Pool {
    /// Minimal pool with the mechanics fields zeroed
    pub fn new(address: impl Into<String>, token_x: TokenInfo, token_y: TokenInfo) -> Self {
        Self {
            address: address.into(),
            name: None,
            token_x,
            token_y,
            bin_step: 0.0,
            base_fee: 0.0,
            tvl: 0.0,
            volume_24h: 0.0,
            apr: 0.0,
            yield_score: None,
            volume_7d: None,
            fees_24h: None,
            apy: None,
            price: None,
            liquidity: None,
            is_verified: false,
        }
    }

    /// "X-Y" pair label
    pub fn pair_name(&self) -> String {
        format!("{}-{}", self.token_x.symbol, self.token_y.symbol)
    }

    /// Volume over TVL, 0 when the pool holds nothing
    pub fn volume_ratio(&self) -> f64 {
        if self.tvl > 0.0 {
            self.volume_24h / self.tvl
        } else {
            0.0
        }
    }

    pub fn has_token(&self, symbol: &str) -> bool {
        self.token_x.symbol.eq_ignore_ascii_case(symbol) || self.token_y.symbol.eq_ignore_ascii_case(symbol)
    }
}

/// One synthetic history point for a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataPoint {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub apr: f64,
    pub tvl: f64,
    pub volume_24h: f64,
    pub price: f64,
}

#[cfg(test)]
pub(crate) fn test_pool(address: &str) -> Pool {
    let mut pool = Pool::new(
        address,
        TokenInfo { symbol: "SOL".to_string(), mint: String::new(), decimals: 9 },
        TokenInfo { symbol: "USDC".to_string(), mint: String::new(), decimals: 6 },
    );
    pool.bin_step = 10.0;
    pool.base_fee = 0.25;
    pool.tvl = 1_000_000.0;
    pool.volume_24h = 500_000.0;
    pool.apr = 50.0;
    pool
}
