//! # hotel-core: Pure Logic for the Hotel Console
//!
//! Everything here is deterministic and free of I/O: the row types the
//! database layer decodes into, validation of console input, the distance
//! helper, and the fixed-width table formatter.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Hotel Console Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/cli (menu loop + handlers)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hotel-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    geo    │  │   table   │  │ validation│  │   │
//! │  │   │   Hotel   │  │ GeoPoint  │  │ TableSpec │  │   dates   │  │   │
//! │  │   │   Room    │  │ distance  │  │  render   │  │    ids    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                hotel-db (PostgreSQL via sqlx)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row types (User, Hotel, Room, Reservation, ...)
//! - [`geo`] - Straight-line distance between coordinates
//! - [`table`] - Fixed-width bordered table renderer
//! - [`validation`] - Parsing and checking of console input
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use hotel_core::validation::parse_date;
//!
//! assert!(parse_date("01/15/2024").is_ok());
//! assert!(parse_date("13/40/2024").is_err());
//! ```

pub mod error;
pub mod geo;
pub mod table;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use geo::GeoPoint;
pub use table::{Align, Column, TableSpec};
pub use types::*;

/// Identifier type shared by every table (PostgreSQL `INTEGER`).
pub type Id = i32;

/// Radius used by "view hotels" when none is configured.
pub const DEFAULT_SEARCH_RADIUS: f64 = 30.0;

/// Row limit for the "recent ..." and "regular customers" views.
pub const RECENT_LIMIT: i64 = 5;

/// Console date format (MM/DD/YYYY).
pub const DATE_FORMAT: &str = "%m/%d/%Y";
