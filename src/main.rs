//! Balancer token list sync - Main executable
//!
//! Fetches the Balancer token list for one chain and overwrites a Google
//! Sheets worksheet with it. Takes no arguments; the target is fixed below.
use anyhow::Context;
use balancer_token_sheet::{ServiceContainer, Settings, SyncTarget};
use dotenv::dotenv;
use log::{error, info};

const CHAIN: &str = "MAINNET";
const SPREADSHEET_NAME: &str = "Token list and pool proposal - Mainnet";
const WORKSHEET_NAME: &str = "Token list";

/// Application entry point
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Balancer token list sync v{}",
        balancer_token_sheet::VERSION
    );

    let settings = Settings::from_env().context("Failed to load settings")?;
    let container = ServiceContainer::new(&settings);

    let target = SyncTarget::new(CHAIN, SPREADSHEET_NAME, WORKSHEET_NAME);
    let report = match container
        .token_list_interactor()
        .sync_token_list(&target)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            error!("Token list sync failed: {:#}", e);
            return Err(e);
        }
    };

    info!(
        "Data written to Google Sheets successfully ({} tokens, {} rows).",
        report.tokens, report.rows_written
    );

    Ok(())
}
