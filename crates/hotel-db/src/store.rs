//! # Hotel Store
//!
//! [`Database`] bundles the session with its repositories, and
//! [`HotelStore`] is the data API the console handlers are written against.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────┐
//! │  console handlers    │ ─────► │  trait HotelStore                │
//! └──────────────────────┘        │   ├── Database  (PostgreSQL)     │
//!                                 │   └── in-memory store (tests)    │
//!                                 └──────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::DbResult;
use crate::repository::{
    BookingRepository, HotelRepository, MaintenanceRepository, RoomRepository, UserRepository,
};
use crate::session::{DbConfig, Session};
use hotel_core::{
    BookingSummary, GeoPoint, Hotel, HotelBooking, Id, RegularCustomer, Reservation, Room,
    RoomRepair, RoomUpdate, User,
};

/// Everything the console needs from the hotel database.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// Creates a customer account and returns its ID.
    async fn create_customer(&self, name: &str, password: &str) -> DbResult<Id>;

    /// Returns the account when ID and password match.
    async fn authenticate(&self, user_id: Id, password: &str) -> DbResult<Option<User>>;

    /// Hotels strictly inside `radius`, nearest first.
    async fn hotels_within(&self, origin: GeoPoint, radius: f64) -> DbResult<Vec<Hotel>>;

    async fn hotel_exists(&self, hotel_id: Id) -> DbResult<bool>;

    async fn manages_hotel(&self, manager_id: Id, hotel_id: Id) -> DbResult<bool>;

    async fn room_exists(&self, hotel_id: Id, room_number: Id) -> DbResult<bool>;

    /// Rooms without a booking on `date`, by room number.
    async fn available_rooms(&self, hotel_id: Id, date: NaiveDate) -> DbResult<Vec<Room>>;

    async fn is_room_booked(&self, hotel_id: Id, room_number: Id, date: NaiveDate)
        -> DbResult<bool>;

    /// Books a room. A taken (hotel, room, date) fails with
    /// [`DbError::UniqueViolation`](crate::DbError::UniqueViolation).
    async fn book_room(
        &self,
        customer_id: Id,
        hotel_id: Id,
        room_number: Id,
        date: NaiveDate,
    ) -> DbResult<Reservation>;

    async fn recent_bookings(&self, customer_id: Id, limit: i64) -> DbResult<Vec<BookingSummary>>;

    async fn update_room_price(&self, hotel_id: Id, room_number: Id, price: i32) -> DbResult<Room>;

    async fn update_room_image(&self, hotel_id: Id, room_number: Id, image_url: &str)
        -> DbResult<Room>;

    async fn recent_room_updates(&self, manager_id: Id, limit: i64) -> DbResult<Vec<RoomUpdate>>;

    async fn hotel_bookings(
        &self,
        manager_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<HotelBooking>>;

    async fn regular_customers(&self, hotel_id: Id, limit: i64) -> DbResult<Vec<RegularCustomer>>;

    async fn company_exists(&self, company_id: Id) -> DbResult<bool>;

    async fn place_repair(&self, company_id: Id, hotel_id: Id, room_number: Id)
        -> DbResult<RoomRepair>;

    async fn repair_history(&self, manager_id: Id) -> DbResult<Vec<RoomRepair>>;

    /// Releases the connection. Safe to call twice.
    async fn close(&self);
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::connect(&DbConfig::new("hotels", 5432, "alice")).await?;
/// let rooms = db.rooms().available_on(3, date).await?;
/// db.close().await;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    session: Session,
}

impl Database {
    /// Opens the session and logs the server version.
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        let session = Session::connect(config).await?;

        match session.server_version().await {
            Ok(version) => info!(%version, "Connected"),
            Err(e) => warn!(error = %e, "Could not read server version"),
        }

        Ok(Database { session })
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.session.clone())
    }

    pub fn hotels(&self) -> HotelRepository {
        HotelRepository::new(self.session.clone())
    }

    pub fn rooms(&self) -> RoomRepository {
        RoomRepository::new(self.session.clone())
    }

    pub fn bookings(&self) -> BookingRepository {
        BookingRepository::new(self.session.clone())
    }

    pub fn maintenance(&self) -> MaintenanceRepository {
        MaintenanceRepository::new(self.session.clone())
    }
}

#[async_trait]
impl HotelStore for Database {
    async fn create_customer(&self, name: &str, password: &str) -> DbResult<Id> {
        self.users().create_customer(name, password).await
    }

    async fn authenticate(&self, user_id: Id, password: &str) -> DbResult<Option<User>> {
        self.users().authenticate(user_id, password).await
    }

    async fn hotels_within(&self, origin: GeoPoint, radius: f64) -> DbResult<Vec<Hotel>> {
        self.hotels().within_radius(origin, radius).await
    }

    async fn hotel_exists(&self, hotel_id: Id) -> DbResult<bool> {
        self.hotels().exists(hotel_id).await
    }

    async fn manages_hotel(&self, manager_id: Id, hotel_id: Id) -> DbResult<bool> {
        self.hotels().is_managed_by(hotel_id, manager_id).await
    }

    async fn room_exists(&self, hotel_id: Id, room_number: Id) -> DbResult<bool> {
        self.rooms().exists(hotel_id, room_number).await
    }

    async fn available_rooms(&self, hotel_id: Id, date: NaiveDate) -> DbResult<Vec<Room>> {
        self.rooms().available_on(hotel_id, date).await
    }

    async fn is_room_booked(
        &self,
        hotel_id: Id,
        room_number: Id,
        date: NaiveDate,
    ) -> DbResult<bool> {
        self.bookings().is_booked(hotel_id, room_number, date).await
    }

    async fn book_room(
        &self,
        customer_id: Id,
        hotel_id: Id,
        room_number: Id,
        date: NaiveDate,
    ) -> DbResult<Reservation> {
        self.bookings()
            .book(customer_id, hotel_id, room_number, date)
            .await
    }

    async fn recent_bookings(&self, customer_id: Id, limit: i64) -> DbResult<Vec<BookingSummary>> {
        self.bookings().recent_for_customer(customer_id, limit).await
    }

    async fn update_room_price(&self, hotel_id: Id, room_number: Id, price: i32) -> DbResult<Room> {
        self.rooms().update_price(hotel_id, room_number, price).await
    }

    async fn update_room_image(
        &self,
        hotel_id: Id,
        room_number: Id,
        image_url: &str,
    ) -> DbResult<Room> {
        self.rooms()
            .update_image_url(hotel_id, room_number, image_url)
            .await
    }

    async fn recent_room_updates(&self, manager_id: Id, limit: i64) -> DbResult<Vec<RoomUpdate>> {
        self.rooms().recent_updates(manager_id, limit).await
    }

    async fn hotel_bookings(
        &self,
        manager_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<HotelBooking>> {
        self.bookings()
            .for_manager_between(manager_id, start, end)
            .await
    }

    async fn regular_customers(&self, hotel_id: Id, limit: i64) -> DbResult<Vec<RegularCustomer>> {
        self.bookings().regular_customers(hotel_id, limit).await
    }

    async fn company_exists(&self, company_id: Id) -> DbResult<bool> {
        self.maintenance().company_exists(company_id).await
    }

    async fn place_repair(
        &self,
        company_id: Id,
        hotel_id: Id,
        room_number: Id,
    ) -> DbResult<RoomRepair> {
        self.maintenance()
            .place_repair(company_id, hotel_id, room_number)
            .await
    }

    async fn repair_history(&self, manager_id: Id) -> DbResult<Vec<RoomRepair>> {
        self.maintenance().repair_history(manager_id).await
    }

    async fn close(&self) {
        self.session.close().await;
    }
}
