//! # hotel-db: Database Layer for the Hotel Console
//!
//! PostgreSQL access through `sqlx`: one session, parameterized
//! statements, and a repository per table group.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Hotel Console Data Flow                          │
//! │                                                                         │
//! │  Handler (book room)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     hotel-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Session     │    │  Repositories │    │  HotelStore  │  │   │
//! │  │   │ (session.rs)  │◄───│ (repository/) │◄───│  (store.rs)  │  │   │
//! │  │   │ one PgConn    │    │ User, Hotel,  │    │  Database    │  │   │
//! │  │   │ execute/query │    │ Room, Booking │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL (schema owned by the database, not by this crate)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`session`] - The database session and its configuration
//! - [`statement`] - SQL text with bound parameters
//! - [`repository`] - Repository implementations
//! - [`store`] - `Database` and the `HotelStore` trait
//! - [`error`] - Database error types

pub mod error;
pub mod repository;
pub mod session;
pub mod statement;
pub mod store;

pub use error::{DbError, DbResult};
pub use session::{DbConfig, Session};
pub use statement::{Param, Statement};
pub use store::{Database, HotelStore};

pub use repository::{
    BookingRepository, HotelRepository, MaintenanceRepository, RoomRepository, UserRepository,
};
