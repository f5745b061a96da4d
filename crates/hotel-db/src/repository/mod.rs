//! # Repository Module
//!
//! Typed, parameterized access to the hotel tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console handler                                                       │
//! │       │                                                                 │
//! │       │  db.rooms().available_on(3, date)                              │
//! │       ▼                                                                 │
//! │  RoomRepository                                                        │
//! │  ├── builds a Statement (SQL + bound params)                           │
//! │  └── runs it on the shared Session                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                            │
//! │                                                                         │
//! │  SQL lives here and only here.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Columns are cast (`::int4`, `::float8`, `::text`) and aliased to the
//! field names of the hotel-core row types, so decoding does not depend on
//! how the schema declared them.
//!
//! ## Available Repositories
//!
//! - [`UserRepository`] - Account creation and login
//! - [`HotelRepository`] - Hotel search and ownership checks
//! - [`RoomRepository`] - Availability, room edits, update log
//! - [`BookingRepository`] - Reservations and booking reports
//! - [`MaintenanceRepository`] - Repair requests

pub mod booking;
pub mod hotel;
pub mod maintenance;
pub mod room;
pub mod user;

pub use booking::BookingRepository;
pub use hotel::HotelRepository;
pub use maintenance::MaintenanceRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
