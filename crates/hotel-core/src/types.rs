//! # Domain Types
//!
//! Row types read from the hotel database.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Row Types                                       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Hotel      │   │      Room       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │   │  hotel_id       │   │  hotel_id  (PK) │       │
//! │  │  name           │   │  hotel_name     │   │  room_number(PK)│       │
//! │  │  user_type      │   │  lat / long     │   │  price          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Views: Reservation, BookingSummary, HotelBooking, RegularCustomer,    │
//! │         RoomUpdate, RoomRepair                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each type implements [`TableRow`] so the console can hand it straight to
//! the formatter. Names come from `CHAR(n)` columns and are trimmed for
//! display.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::table::TableRow;
use crate::{Id, DATE_FORMAT};

/// Formats a date the way the console accepts it (MM/DD/YYYY).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// =============================================================================
// Users
// =============================================================================

/// The two kinds of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Manager,
}

impl UserType {
    /// Classifies the raw `userType` column.
    ///
    /// Values mentioning "customer" are customers; anything else gets the
    /// manager menu.
    pub fn from_db(raw: &str) -> Self {
        if raw.trim().to_lowercase().contains("customer") {
            UserType::Customer
        } else {
            UserType::Manager
        }
    }

    /// Value stored in the `userType` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Manager => "manager",
        }
    }
}

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub user_id: Id,
    pub name: String,
    pub user_type: String,
}

impl User {
    /// Returns the account kind.
    pub fn kind(&self) -> UserType {
        UserType::from_db(&self.user_type)
    }
}

// =============================================================================
// Hotels & Rooms
// =============================================================================

/// A hotel with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Hotel {
    pub hotel_id: Id,
    pub hotel_name: String,
    pub date_established: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
}

impl Hotel {
    /// Returns the hotel's coordinates.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl TableRow for Hotel {
    fn cells(&self) -> Vec<String> {
        vec![
            self.hotel_id.to_string(),
            self.hotel_name.trim().to_string(),
            format_date(self.date_established),
        ]
    }
}

/// A room, keyed by (hotel_id, room_number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Room {
    pub hotel_id: Id,
    pub room_number: Id,
    pub price: i32,
    pub image_url: Option<String>,
}

impl TableRow for Room {
    fn cells(&self) -> Vec<String> {
        vec![
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            self.price.to_string(),
            self.image_url.clone().unwrap_or_default(),
        ]
    }
}

// =============================================================================
// Bookings
// =============================================================================

/// A freshly created booking joined with the room price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    pub booking_id: Id,
    pub customer_id: Id,
    pub hotel_id: Id,
    pub room_number: Id,
    pub booking_date: NaiveDate,
    pub price: i32,
}

impl TableRow for Reservation {
    fn cells(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            self.customer_id.to_string(),
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            format_date(self.booking_date),
            self.price.to_string(),
        ]
    }
}

/// One line of a customer's own booking history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BookingSummary {
    pub booking_id: Id,
    pub hotel_id: Id,
    pub room_number: Id,
    pub booking_date: NaiveDate,
    pub price: i32,
}

impl TableRow for BookingSummary {
    fn cells(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            format_date(self.booking_date),
            self.price.to_string(),
        ]
    }
}

/// A booking at a hotel, as seen by its manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HotelBooking {
    pub booking_id: Id,
    pub customer_name: String,
    pub hotel_id: Id,
    pub room_number: Id,
    pub booking_date: NaiveDate,
    pub price: i32,
}

impl TableRow for HotelBooking {
    fn cells(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            self.customer_name.trim().to_string(),
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            format_date(self.booking_date),
            self.price.to_string(),
        ]
    }
}

/// A customer ranked by number of bookings at one hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RegularCustomer {
    pub user_id: Id,
    pub name: String,
    pub bookings: i64,
}

impl TableRow for RegularCustomer {
    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.name.trim().to_string(),
            self.bookings.to_string(),
        ]
    }
}

// =============================================================================
// Maintenance
// =============================================================================

/// An entry of the room update audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RoomUpdate {
    pub update_number: Id,
    pub manager_id: Id,
    pub hotel_id: Id,
    pub room_number: Id,
    pub updated_on: NaiveDateTime,
}

impl TableRow for RoomUpdate {
    fn cells(&self) -> Vec<String> {
        vec![
            self.update_number.to_string(),
            self.manager_id.to_string(),
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            self.updated_on.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

/// A repair request sent to a maintenance company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RoomRepair {
    pub repair_id: Id,
    pub company_id: Id,
    pub hotel_id: Id,
    pub room_number: Id,
    pub repair_date: NaiveDate,
}

impl TableRow for RoomRepair {
    fn cells(&self) -> Vec<String> {
        vec![
            self.repair_id.to_string(),
            self.company_id.to_string(),
            self.hotel_id.to_string(),
            self.room_number.to_string(),
            format_date(self.repair_date),
        ]
    }
}
