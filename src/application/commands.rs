//! CLI commands and handlers
use clap::{Parser, Subcommand};
use crate::application::alert_monitor::AlertMonitor;
use crate::application::report::{render_alert, render_projection, PoolReport};
use crate::application::services::DashboardService;
use crate::domain::pool::{Pool, PoolQuery, SortKey, TokenInfo};
use crate::domain::yields::YieldCalculator;
use crate::infrastructure::{LogNotifier, MeteoraApiClient};
use crate::shared::errors::AppError;
use crate::shared::types::DashboardConfig;
use crate::shared::utils::{format_currency, format_percentage};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How many alerts the monitor prints when it stops
const ALERT_SUMMARY_LEN: usize = 10;

#[derive(Parser)]
#[command(name = "dlmm-yield-monitor")]
#[command(version, about = "Meteora DLMM pool yield dashboard and alert monitor")]
pub struct Cli {
    /// Path to config file (defaults to Config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List pools ranked by yield score, APR, TVL or volume
    Pools {
        /// Minimum APR in percent
        #[arg(long, default_value_t = 0.0)]
        min_apr: f64,

        /// Minimum TVL in USD
        #[arg(long, default_value_t = 0.0)]
        min_tvl: f64,

        /// Only pools holding this token symbol
        #[arg(short, long)]
        token: Option<String>,

        /// Substring of the "X-Y" pair name
        #[arg(short, long)]
        search: Option<String>,

        /// Sort key: yield, apr, tvl, volume
        #[arg(long, default_value = "yield")]
        sort: SortKey,

        /// Limit number of pools to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one pool with projected returns
    Pool {
        /// Pool address
        address: String,

        /// Investment in USD
        #[arg(short, long, default_value_t = 1000.0)]
        investment: f64,
    },

    /// Project returns for a hypothetical pool
    Calc {
        /// APR in percent
        #[arg(long)]
        apr: f64,

        /// Investment in USD
        #[arg(short, long, default_value_t = 1000.0)]
        investment: f64,

        /// Pool TVL in USD
        #[arg(long, default_value_t = 5_000_000.0)]
        tvl: f64,

        /// Pool 24h volume in USD
        #[arg(long, default_value_t = 1_000_000.0)]
        volume: f64,
    },

    /// Show daily history of a pool
    History {
        /// Pool address
        address: String,

        /// Number of days back
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },

    /// Show the USD price of a token
    Price {
        /// CoinGecko token id, e.g. "solana"
        token_id: String,
    },

    /// Poll pools and raise alerts on changes
    Monitor {
        /// Seconds between cycles (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many seconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// High-APR alert threshold in percent (overrides config)
        #[arg(long)]
        min_apr: Option<f64>,

        /// Volume spike threshold in percent (overrides config)
        #[arg(long)]
        volume_spike: Option<f64>,

        /// TVL drop threshold in percent (overrides config)
        #[arg(long)]
        tvl_drop: Option<f64>,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: DashboardConfig) -> Result<(), AppError> {
        match command {
            Commands::Pools { min_apr, min_tvl, token, search, sort, limit, json } => {
                let query = PoolQuery { min_apr, min_tvl, token, search, sort_by: sort, limit: Some(limit) };
                Self::execute_pools_command(query, json, config).await
            }
            Commands::Pool { address, investment } => {
                Self::execute_pool_command(&address, investment, config).await
            }
            Commands::Calc { apr, investment, tvl, volume } => {
                Self::execute_calc_command(apr, investment, tvl, volume);
                Ok(())
            }
            Commands::History { address, days } => {
                Self::execute_history_command(&address, days, config)
            }
            Commands::Price { token_id } => {
                Self::execute_price_command(&token_id, config).await
            }
            Commands::Monitor { interval, duration, min_apr, volume_spike, tvl_drop } => {
                let mut config = config;
                if let Some(interval) = interval {
                    config.monitor.interval_secs = interval;
                }
                if let Some(min_apr) = min_apr {
                    config.alerts.min_apr = min_apr;
                }
                if let Some(volume_spike) = volume_spike {
                    config.alerts.volume_spike_threshold = volume_spike;
                }
                if let Some(tvl_drop) = tvl_drop {
                    config.alerts.tvl_drop_threshold = tvl_drop;
                }
                Self::execute_monitor_command(duration.map(Duration::from_secs), config).await
            }
        }
    }

    async fn load_dashboard(config: &DashboardConfig) -> Result<DashboardService, AppError> {
        let client = MeteoraApiClient::new(&config.api)?;
        let mut service = DashboardService::new(Arc::new(client));
        service.refresh().await?;
        Ok(service)
    }

    /// Execute pools command
    async fn execute_pools_command(query: PoolQuery, json: bool, config: DashboardConfig) -> Result<(), AppError> {
        info!("🔍 Fetching pools from {}", config.api.base_url);
        let service = Self::load_dashboard(&config).await?;

        let ranked = service.ranked(&query);
        let report = PoolReport::new(&ranked, service.pools().len());

        if json {
            let out = report
                .to_json()
                .map_err(|e| AppError::Unknown(format!("Failed to serialize report: {}", e)))?;
            println!("{}", out);
        } else {
            print!("{}", report.to_table());
        }
        Ok(())
    }

    /// Execute pool command
    async fn execute_pool_command(address: &str, investment: f64, config: DashboardConfig) -> Result<(), AppError> {
        info!("🔍 Looking up pool {}", address);
        let service = Self::load_dashboard(&config).await?;

        let projection = service.project(address, investment)?;
        println!("{}", render_projection(&projection));
        Ok(())
    }

    /// Execute calc command
    fn execute_calc_command(apr: f64, investment: f64, tvl: f64, volume: f64) {
        let mut pool = Pool::new("calculator", TokenInfo::default(), TokenInfo::default());
        pool.apr = apr;
        pool.tvl = tvl;
        pool.volume_24h = volume;
        pool.apy = Some(YieldCalculator::calculate_apy(apr));
        pool.yield_score = Some(YieldCalculator::calculate_yield_score(&pool));

        let projection = YieldCalculator::calculate_yields(&pool, investment);
        println!("{}", render_projection(&projection));
        println!("Yield score: {:.2}", pool.yield_score.unwrap_or(0.0));
    }

    /// Execute history command
    fn execute_history_command(address: &str, days: u32, config: DashboardConfig) -> Result<(), AppError> {
        let client = MeteoraApiClient::new(&config.api)?;
        let history = client.get_historical_data(address, days);

        println!("{:<12} {:>10} {:>12} {:>12} {:>8}", "Date", "APR", "TVL", "Volume 24h", "Price");
        for point in &history {
            println!(
                "{:<12} {:>10} {:>12} {:>12} {:>8.4}",
                point.timestamp.format("%Y-%m-%d"),
                format_percentage(point.apr, 2),
                format_currency(point.tvl),
                format_currency(point.volume_24h),
                point.price
            );
        }
        Ok(())
    }

    /// Execute price command
    async fn execute_price_command(token_id: &str, config: DashboardConfig) -> Result<(), AppError> {
        let client = MeteoraApiClient::new(&config.api)?;
        let price = client.get_token_price(token_id).await;

        if price == 0.0 {
            warn!("⚠️ No price available for {}", token_id);
        }
        println!("{}: ${:.4}", token_id, price);
        Ok(())
    }

    /// Execute monitor command
    async fn execute_monitor_command(duration: Option<Duration>, config: DashboardConfig) -> Result<(), AppError> {
        info!("📊 Alert configuration:");
        info!("   Enabled: {}", config.alerts.enabled);
        info!("   High APR: >= {}", format_percentage(config.alerts.min_apr, 1));
        info!("   Volume spike: >= {}", format_percentage(config.alerts.volume_spike_threshold, 1));
        info!("   TVL drop: >= {}", format_percentage(config.alerts.tvl_drop_threshold, 1));
        if let Some(duration) = duration {
            info!("⏱️  Monitor will run for {} seconds", duration.as_secs());
        }

        let client = MeteoraApiClient::new(&config.api)?;
        let mut monitor = AlertMonitor::new(
            Arc::new(client),
            Arc::new(LogNotifier::new()),
            config.alerts.clone(),
            &config.monitor,
        );
        monitor.run(duration).await?;

        let alerts = monitor.manager().alerts();
        if !alerts.is_empty() {
            println!("Recent alerts ({} retained):", alerts.len());
            for alert in alerts.iter().take(ALERT_SUMMARY_LEN) {
                println!("{}", render_alert(alert));
            }
        }
        Ok(())
    }
}
