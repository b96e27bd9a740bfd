use anyhow::Result;
use clap::Parser;
use dlmm_yield_monitor::application::{Cli, CommandExecutor};
use dlmm_yield_monitor::shared::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // Priority: CLI flags > config file > defaults
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    CommandExecutor::execute(cli.command, config).await?;
    Ok(())
}
