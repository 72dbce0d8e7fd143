//! Server binary: load config, connect the store, serve HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lastwatched_core::Config;
use lastwatched_server::db;
use lastwatched_server::db::repos::MySqlSeriesStore;
use lastwatched_server::http::{run_server, AppState};

#[derive(Parser, Debug)]
#[command(name = "lastwatched-server", about = "TV series watch-progress backend")]
struct Args {
    /// Path to the TOML config file (falls back to LASTWATCHED_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the port from the config file.
    #[arg(long)]
    port: Option<u16>,
}

fn init_tracing(fallback_filter: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter.unwrap_or("info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(config.server.log_filter.as_deref()).ok();

    let pool = db::pool::create_pool_with_options(
        &config.database.url,
        config.database.max_connections,
    )
    .await
    .context("Failed to connect to the database")?;

    db::migrations::run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(Arc::new(MySqlSeriesStore::new(pool)));
    let addr = config.bind_addr()?;

    run_server(state, addr).await?;
    Ok(())
}
