//! Application layer - use cases and services

pub mod alert_monitor;
pub mod commands;
pub mod report;
pub mod services;

pub use alert_monitor::{AlertMonitor, MonitorStats};
pub use commands::{Cli, Commands, CommandExecutor};
pub use services::DashboardService;
