//! Utility functions and helpers

/// Format a dollar amount with a B/M/K suffix
pub fn format_currency(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// Format percentage with the requested number of decimals
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First `n` characters of an address, used in alert ids and log lines
pub fn short_address(address: &str, n: usize) -> &str {
    match address.char_indices().nth(n) {
        Some((idx, _)) => &address[..idx],
        None => address,
    }
}
