//! Synthetic pool history

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::domain::pool::HistoricalDataPoint;

/// `days + 1` daily points, oldest first, ending at `now`
pub fn synthetic_history(days: u32, now: DateTime<Utc>) -> Vec<HistoricalDataPoint> {
    let mut rng = rand::thread_rng();

    (0..=days)
        .rev()
        .map(|i| HistoricalDataPoint {
            timestamp: now - Duration::days(i64::from(i)),
            apr: rng.gen_range(10.0..60.0),
            tvl: rng.gen_range(100_000.0..600_000.0),
            volume_24h: rng.gen_range(10_000.0..110_000.0),
            price: rng.gen_range(1.0..1.2),
        })
        .collect()
}
