//! ProphetSol - Solana token lookup service
//!
//! Answers price and metadata questions for a mint by querying Birdeye,
//! Jupiter and the Solana token list in fixed priority order.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use prophet_sol::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (BIRDEYE_API_KEY goes here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config = cli::load(app.config_path())?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    cli::execute(app, config).await
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}
