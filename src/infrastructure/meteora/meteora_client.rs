//! HTTP client for the Meteora DLMM pair API

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::domain::pool::{HistoricalDataPoint, Pool, PoolDataSource, PoolNormalizer};
use crate::shared::errors::{AppError, SourceError};
use crate::shared::types::ApiConfig;
use super::history::synthetic_history;

/// Cached USD price of a token
#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: f64,
    fetched_at: Instant,
}

/// Meteora DLMM API client
pub struct MeteoraApiClient {
    client: Client,
    base_url: String,
    price_api_url: String,
    cache_ttl: Duration,
    price_cache: RwLock<HashMap<String, CachedPrice>>,
}

impl MeteoraApiClient {
    /// Create new API client
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::SourceError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            price_api_url: config.price_api_url.trim_end_matches('/').to_string(),
            cache_ttl: Duration::from_secs(config.price_cache_ttl_secs),
            price_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Fetch and normalize every pair
    pub async fn get_all_pools(&self) -> Result<Vec<Pool>, AppError> {
        let response = self.fetch_pairs().await.map_err(|e| {
            error!("Error fetching pools: {}", e);
            AppError::SourceError(format!("Failed to fetch pools from Meteora: {}", e))
        })?;

        let pools = PoolNormalizer::normalize_batch(&response);
        debug!("Fetched {} pools from {}", pools.len(), self.base_url);
        Ok(pools)
    }

    /// Look up one pool; fetch failures are logged and yield `None`
    pub async fn get_pool_by_address(&self, address: &str) -> Option<Pool> {
        match self.get_all_pools().await {
            Ok(pools) => pools.into_iter().find(|p| p.address == address),
            Err(e) => {
                warn!("Error fetching pool {}: {}", address, e);
                None
            }
        }
    }

    /// Pools holding `symbol` on either side, case-insensitive
    pub async fn get_pools_by_token(&self, symbol: &str) -> Result<Vec<Pool>, AppError> {
        let pools = self.get_all_pools().await?;
        Ok(pools.into_iter().filter(|p| p.has_token(symbol)).collect())
    }

    /// USD price of a CoinGecko token id, cached for the configured TTL.
    /// Failures are logged and yield 0.
    pub async fn get_token_price(&self, token_id: &str) -> f64 {
        if let Some(price) = self.cached_price(token_id).await {
            return price;
        }

        match self.fetch_price(token_id).await {
            Ok(price) => {
                self.store_price(token_id, price).await;
                price
            }
            Err(e) => {
                warn!("Error fetching price for {}: {}", token_id, e);
                0.0
            }
        }
    }

    /// Synthetic daily history; no historical source is wired in
    pub fn get_historical_data(&self, pool_address: &str, days: u32) -> Vec<HistoricalDataPoint> {
        debug!("Generating {} days of synthetic history for {}", days, pool_address);
        synthetic_history(days, Utc::now())
    }

    async fn fetch_pairs(&self) -> Result<Value, SourceError> {
        let url = format!("{}/pair/all", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    async fn fetch_price(&self, token_id: &str) -> Result<f64, SourceError> {
        let url = format!("{}/simple/price", self.price_api_url);
        let body = self
            .client
            .get(&url)
            .query(&[("ids", token_id), ("vs_currencies", "usd")])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(parse_usd_price(&body, token_id))
    }

    async fn cached_price(&self, token_id: &str) -> Option<f64> {
        let cache = self.price_cache.read().await;
        cache
            .get(token_id)
            .filter(|cached| cached.fetched_at.elapsed() < self.cache_ttl)
            .map(|cached| cached.price)
    }

    async fn store_price(&self, token_id: &str, price: f64) {
        let mut cache = self.price_cache.write().await;
        cache.insert(token_id.to_string(), CachedPrice { price, fetched_at: Instant::now() });
    }
}

#[async_trait]
impl PoolDataSource for MeteoraApiClient {
    async fn fetch_pools(&self) -> Result<Vec<Pool>, AppError> {
        self.get_all_pools().await
    }
}

/// `{"<id>": {"usd": <price>}}`, 0 when absent
fn parse_usd_price(body: &Value, token_id: &str) -> f64 {
    body.get(token_id)
        .and_then(|entry| entry.get("usd"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}
