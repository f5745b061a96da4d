//! # hotel
//!
//! Usage: `hotel <dbname> <port> <user>`
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hotel Console                                    │
//! │                                                                         │
//! │  stdin ───► Menu ───► Handlers ───► HotelStore ───► PostgreSQL         │
//! │                │                                                        │
//! │                ▼                                                        │
//! │             stdout (tables)        stderr (errors, logs)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use hotel_cli::{init_tracing, run_session, AppConfig, Args, Prompter};
use hotel_db::Database;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db_config = config.db_config(&args);
    info!(url = %db_config.display_url(), radius = config.search_radius, "Configuration loaded");

    print!("Connecting to database...");
    println!("\nConnection URL: {}", db_config.display_url());

    let db = match Database::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Unable to connect");
            eprintln!("Error - Unable to Connect to Database: {}", e);
            eprintln!("Make sure you started postgres on this machine");
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("Done");

    let mut console = Prompter::new(io::stdin().lock(), io::stdout().lock(), config.color);

    run_session(&db, &mut console, config.search_radius)
        .await
        .context("Console session ended with an error")?;

    Ok(ExitCode::SUCCESS)
}
