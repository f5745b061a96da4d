//! # Database Session
//!
//! The one live PostgreSQL connection of the process.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Session                                   │
//! │                                                                         │
//! │  Console startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(db, port, user) ← Where and as whom to connect          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session::connect(&config).await ← Fails fast: ConnectionFailed        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  PgPool capped at ONE connection        │                           │
//! │  │  ┌─────┐                                │                           │
//! │  │  │Conn1│  every handler goes through it │                           │
//! │  │  └─────┘                                │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  execute / query / query_count ... close                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{Column, FromRow, PgPool, Row, TypeInfo, ValueRef};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::statement::Statement;

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings.
///
/// ## Example
/// ```rust
/// use hotel_db::DbConfig;
///
/// let config = DbConfig::new("hotels", 5432, "alice")
///     .host("db.internal")
///     .password("s3cret");
/// assert_eq!(config.port, 5432);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Server host name.
    /// Default: localhost
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Login role.
    pub user: String,

    /// Login password.
    /// Default: empty
    pub password: String,

    /// How long to wait for the server before giving up.
    /// Default: 30 seconds
    pub connect_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration for `database` on localhost.
    pub fn new(database: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        DbConfig {
            host: "localhost".to_string(),
            port,
            database: database.into(),
            user: user.into(),
            password: String::new(),
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the server host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connection URL for display; the password is never included.
    pub fn display_url(&self) -> String {
        format!(
            "postgresql://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

// =============================================================================
// Session
// =============================================================================

/// The database session.
///
/// Cloning is cheap and every clone shares the same single connection.
#[derive(Debug, Clone)]
pub struct Session {
    pool: PgPool,
}

impl Session {
    /// Opens the session.
    ///
    /// ## Returns
    /// * `Ok(Session)` - Connected
    /// * `Err(DbError::ConnectionFailed)` - Server unreachable or login refused
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        info!(url = %config.display_url(), "Connecting to database");

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database session opened");
        Ok(Session { pool })
    }

    /// Runs a statement that returns no rows (INSERT, UPDATE, DELETE, DDL).
    ///
    /// ## Returns
    /// Number of rows affected.
    pub async fn execute(&self, stmt: &Statement) -> DbResult<u64> {
        debug!(sql = %stmt.sql(), params = stmt.params().len(), "Executing statement");

        let result = sqlx::query_with(stmt.sql(), stmt.arguments()?)
            .execute(&self.pool)
            .await
            .map_err(log_failure)?;

        Ok(result.rows_affected())
    }

    /// Runs a query and returns every row as strings.
    ///
    /// NULL becomes an empty string. No rows gives an empty vector.
    pub async fn query(&self, stmt: &Statement) -> DbResult<Vec<Vec<String>>> {
        debug!(sql = %stmt.sql(), params = stmt.params().len(), "Running query");

        let rows = sqlx::query_with(stmt.sql(), stmt.arguments()?)
            .fetch_all(&self.pool)
            .await
            .map_err(log_failure)?;

        rows.iter().map(row_to_strings).collect()
    }

    /// Number of rows a query returns.
    pub async fn query_count(&self, stmt: &Statement) -> DbResult<usize> {
        debug!(sql = %stmt.sql(), params = stmt.params().len(), "Counting rows");

        let rows = sqlx::query_with(stmt.sql(), stmt.arguments()?)
            .fetch_all(&self.pool)
            .await
            .map_err(log_failure)?;

        Ok(rows.len())
    }

    /// Runs a query and decodes every row into `T`.
    pub async fn fetch_all<T>(&self, stmt: &Statement) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        debug!(sql = %stmt.sql(), params = stmt.params().len(), "Fetching rows");

        let rows = sqlx::query_as_with::<_, T, _>(stmt.sql(), stmt.arguments()?)
            .fetch_all(&self.pool)
            .await
            .map_err(log_failure)?;

        Ok(rows)
    }

    /// Runs a query and decodes the first row, if any.
    pub async fn fetch_optional<T>(&self, stmt: &Statement) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        debug!(sql = %stmt.sql(), params = stmt.params().len(), "Fetching one row");

        let row = sqlx::query_as_with::<_, T, _>(stmt.sql(), stmt.arguments()?)
            .fetch_optional(&self.pool)
            .await
            .map_err(log_failure)?;

        Ok(row)
    }

    /// Runs a query that must return exactly one row.
    pub async fn fetch_one<T>(&self, stmt: &Statement) -> DbResult<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.fetch_optional(stmt)
            .await?
            .ok_or_else(|| DbError::not_found("Row", stmt.sql().trim()))
    }

    /// Server version string, for the startup log.
    pub async fn server_version(&self) -> DbResult<String> {
        let rows = self.query(&Statement::new("SELECT version()")).await?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_default())
    }

    /// Closes the session. Calling it again does nothing.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }

        info!("Closing database session");
        self.pool.close().await;
    }
}

fn log_failure(err: sqlx::Error) -> DbError {
    let err = DbError::from(err);
    warn!(error = %err, "Statement failed");
    err
}

// =============================================================================
// Row Rendering
// =============================================================================

fn row_to_strings(row: &PgRow) -> DbResult<Vec<String>> {
    (0..row.len()).map(|i| cell_to_string(row, i)).collect()
}

/// Renders one cell by its PostgreSQL type.
fn cell_to_string(row: &PgRow, index: usize) -> DbResult<String> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(String::new());
    }

    let column = row.column(index);
    let type_name = column.type_info().name().to_string();

    let text = match type_name.as_str() {
        "INT2" => row.try_get::<i16, _>(index)?.to_string(),
        "INT4" => row.try_get::<i32, _>(index)?.to_string(),
        "INT8" => row.try_get::<i64, _>(index)?.to_string(),
        "FLOAT4" => row.try_get::<f32, _>(index)?.to_string(),
        "FLOAT8" => row.try_get::<f64, _>(index)?.to_string(),
        "BOOL" => row.try_get::<bool, _>(index)?.to_string(),
        "DATE" => row.try_get::<NaiveDate, _>(index)?.to_string(),
        "TIMESTAMP" => row.try_get::<NaiveDateTime, _>(index)?.to_string(),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => row.try_get::<String, _>(index)?,
        _ => {
            return Err(DbError::UnsupportedColumn {
                column: column.name().to_string(),
                type_name,
            })
        }
    };

    Ok(text)
}
