use std::fs;
use std::path::Path;
use crate::shared::types::DashboardConfig;
use crate::shared::errors::AppError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;

        Self::parse(&config_content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<DashboardConfig, AppError> {
        toml::from_str(content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Load the given file, or `Config.toml` if it exists, or fall back to defaults
    pub fn load_or_default(path: Option<&str>) -> Result<DashboardConfig, AppError> {
        match path {
            Some(path) => Self::load_config(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load_config(DEFAULT_CONFIG_FILE),
            None => Ok(DashboardConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let cfg = ConfigLoader::parse(
            r#"
            [alerts]
            min_apr = 35.0
            enabled = false

            [monitor]
            interval_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(cfg.alerts.min_apr, 35.0);
        assert!(!cfg.alerts.enabled);
        assert_eq!(cfg.alerts.volume_spike_threshold, 50.0);
        assert_eq!(cfg.alerts.tvl_drop_threshold, 20.0);
        assert_eq!(cfg.monitor.interval_secs, 10);
        assert_eq!(cfg.monitor.history_limit, 100);
        assert_eq!(cfg.api.base_url, "https://dlmm-api.meteora.ag");
    }

    #[test]
    fn test_parse_empty_config() {
        let cfg = ConfigLoader::parse("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = ConfigLoader::parse("[alerts]\nmin_apr = \"high\"");
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntimeout_ms = 5000").unwrap();

        let cfg = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(cfg.api.timeout_ms, 5000);
        assert_eq!(cfg.api.price_cache_ttl_secs, 60);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::load_or_default(Some("/nonexistent/dlmm/Config.toml"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
