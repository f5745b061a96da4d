//! # Hotel Console
//!
//! Console front-end for the hotel reservation database.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Console Startup Flow                                │
//! │                                                                         │
//! │  1. Parse <dbname> <port> <user>       (clap)                           │
//! │  2. Initialize tracing                 (stderr, RUST_LOG)               │
//! │  3. Load environment settings          (HOTEL_*)                        │
//! │  4. Connect                            (one connection, fatal on error) │
//! │  5. run_session: menu loop, then disconnect                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - Arguments and environment settings
//! - [`console`] - Prompting over any reader / writer
//! - [`menu`] - The menu state machine
//! - [`handlers`] - One function per menu action
//! - [`error`] - Console error type

pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod menu;

#[cfg(test)]
mod testing;

use std::io::{BufRead, Write};

use tracing_subscriber::EnvFilter;

use hotel_db::HotelStore;

pub use config::{AppConfig, Args, ConfigError};
pub use console::Prompter;
pub use error::{CliError, CliResult};
pub use menu::{Menu, MenuState};

/// Installs the stderr log subscriber.
///
/// ## Default Filter
/// `warn,sqlx=warn` keeps the menu clean. Override with `RUST_LOG`,
/// e.g. `RUST_LOG=hotel_db=debug`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the menu loop, then closes the store whatever the outcome.
pub async fn run_session<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    radius: f64,
) -> CliResult<()> {
    let outcome = Menu::new(store, console, radius).run().await;

    let farewell = console.print("Disconnecting from database...");
    store.close().await;
    let farewell = farewell.and_then(|()| {
        console.say("Done\n\nThank you for using the Hotel Database Management System!")
    });

    outcome.and(farewell)
}
