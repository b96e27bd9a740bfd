//! DLMM Yield Monitor - Meteora DLMM pool scoring and alerting
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use domain::alert::{Alert, AlertManager};
pub use domain::pool::{Pool, PoolManager, PoolNormalizer};
pub use domain::yields::YieldCalculator;
pub use infrastructure::MeteoraApiClient;
