//! Alert delivery

mod log_notifier;

pub use log_notifier::LogNotifier;
