//! Command-line entry point of the watcher.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{eyre, Result};
use log::info;

use perch::config::Config;
use perch::render::print_view;
use perch::sync::{evaluate_once, watch};
use perch::utils::app_context::AppContext;
use perch::utils::logger::setup_logger;
use perch::watchlist::WatchList;

/// Command-line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Wallet address to view positions for (overrides PERCH_ACCOUNT)
    #[arg(long)]
    account: Option<String>,

    /// Subcommand to run; defaults to watching
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Watch positions continuously
    Watch,
    /// Evaluate the view once and exit
    View,
    /// Add a pair to the watchlist file
    Import {
        /// One token of the pair
        token0: String,
        /// The other token of the pair
        token1: String,
    },
}

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_logger().expect("Failed to set up logger");

    let mut config = Config::from_env()?;
    let cli = Cli::parse();
    if let Some(account) = cli.account.as_deref() {
        config.account = Some(account.parse()?);
    }

    match cli.command {
        Some(Commands::Import { token0, token1 }) => {
            import_pair(&config, &token0, &token1)?;
        }
        Some(Commands::View) => {
            let watchlist = WatchList::load(config.watchlist_path.as_deref())?;
            let ctx = AppContext::new(config)?;
            let view = evaluate_once(&ctx, &watchlist).await?;
            print_view(&view.state);
        }
        Some(Commands::Watch) | None => {
            let watchlist = WatchList::load(config.watchlist_path.as_deref())?;
            info!("main: watching {} tracked pairs", watchlist.pairs().len());
            let ctx = AppContext::new(config)?;
            watch(&ctx, &watchlist).await?;
        }
    }

    Ok(())
}

/// Imports a pair into the configured watchlist file
fn import_pair(config: &Config, token0: &str, token1: &str) -> Result<()> {
    let path = config
        .watchlist_path
        .as_deref()
        .ok_or_else(|| eyre!("PERCH_WATCHLIST must be set to import pairs"))?;

    let pair = WatchList::import(path, token0.parse()?, token1.parse()?)?;
    info!("main: imported {pair} into {}", path.display());
    Ok(())
}
