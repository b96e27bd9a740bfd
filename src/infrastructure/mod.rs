//! Infrastructure layer - pool API access and alert delivery

pub mod meteora;
pub mod notification;

pub use meteora::MeteoraApiClient;
pub use notification::LogNotifier;
