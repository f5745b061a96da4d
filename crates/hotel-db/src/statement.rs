//! # Parameterized Statements
//!
//! SQL text plus the values bound to its `$n` placeholders.
//!
//! ## Why Not Format Strings
//! ```text
//! ❌ format!("... WHERE userID = {}", input)       ← input becomes SQL
//! ✅ Statement::new("... WHERE userID = $1").bind(id) ← input stays data
//! ```
//!
//! Console input never reaches the SQL text; it only travels as a bound
//! parameter.

use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use crate::error::{DbError, DbResult};

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Param::Int(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::BigInt(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<NaiveDate> for Param {
    fn from(v: NaiveDate) -> Self {
        Param::Date(v)
    }
}

/// An SQL statement with its bound parameters.
///
/// ## Example
/// ```rust
/// use hotel_db::Statement;
///
/// let stmt = Statement::new("SELECT hotelID FROM Hotel WHERE hotelID = $1").bind(3);
/// assert_eq!(stmt.params().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Param>,
}

impl Statement {
    /// Creates a statement with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Binds the next placeholder.
    pub fn bind(mut self, value: impl Into<Param>) -> Self {
        self.params.push(value.into());
        self
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound parameters, in placeholder order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Encodes the parameters for the PostgreSQL driver.
    pub(crate) fn arguments(&self) -> DbResult<PgArguments> {
        let mut args = PgArguments::default();

        for param in &self.params {
            let added = match param {
                Param::Int(v) => args.add(*v),
                Param::BigInt(v) => args.add(*v),
                Param::Float(v) => args.add(*v),
                Param::Text(v) => args.add(v.clone()),
                Param::Date(v) => args.add(*v),
            };
            added.map_err(|e| DbError::Internal(format!("cannot bind parameter: {}", e)))?;
        }

        Ok(args)
    }
}
