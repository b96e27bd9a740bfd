//! Meteora DLMM API access

mod history;
mod meteora_client;

pub use history::synthetic_history;
pub use meteora_client::MeteoraApiClient;
