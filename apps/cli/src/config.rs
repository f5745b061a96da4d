//! Console configuration module.
//!
//! The database, port and user come from the command line; everything else
//! is loaded from environment variables with fallback to defaults.

use std::env;
use std::time::Duration;

use clap::Parser;

use hotel_core::validation::validate_radius;
use hotel_core::DEFAULT_SEARCH_RADIUS;
use hotel_db::DbConfig;

/// Command line arguments: `hotel <dbname> <port> <user>`.
#[derive(Debug, Clone, Parser)]
#[command(name = "hotel", version, about = "Hotel reservation console")]
pub struct Args {
    /// Database name
    pub dbname: String,

    /// PostgreSQL port
    pub port: u16,

    /// Database user
    pub user: String,
}

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// PostgreSQL host
    pub db_host: String,

    /// PostgreSQL password (empty by default)
    pub db_password: String,

    /// Radius used by "View Hotels"
    pub search_radius: f64,

    /// Seconds to wait for the server
    pub connect_timeout_secs: u64,

    /// ANSI colors on banners and menu titles
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_host: "localhost".to_string(),
            db_password: String::new(),
            search_radius: DEFAULT_SEARCH_RADIUS,
            connect_timeout_secs: 30,
            color: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = AppConfig {
            db_host: lookup("HOTEL_DB_HOST").unwrap_or_else(|| "localhost".to_string()),

            db_password: lookup("HOTEL_DB_PASSWORD").unwrap_or_default(),

            search_radius: lookup("HOTEL_SEARCH_RADIUS")
                .unwrap_or_else(|| DEFAULT_SEARCH_RADIUS.to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOTEL_SEARCH_RADIUS".to_string()))?,

            connect_timeout_secs: lookup("HOTEL_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .trim()
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("HOTEL_CONNECT_TIMEOUT_SECS".to_string())
                })?,

            color: lookup("HOTEL_NO_COLOR").is_none(),
        };

        validate_radius(config.search_radius)
            .map_err(|_| ConfigError::InvalidValue("HOTEL_SEARCH_RADIUS".to_string()))?;

        Ok(config)
    }

    /// Builds the session settings for the given arguments.
    pub fn db_config(&self, args: &Args) -> DbConfig {
        DbConfig::new(&args.dbname, args.port, &args.user)
            .host(&self.db_host)
            .password(&self.db_password)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
