//! Pool data source interface

use async_trait::async_trait;

use crate::shared::errors::AppError;
use super::Pool;

/// Supplies the current pool snapshot on demand, already normalized
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    async fn fetch_pools(&self) -> Result<Vec<Pool>, AppError>;
}
