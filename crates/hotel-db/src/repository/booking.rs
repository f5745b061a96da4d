//! # Booking Repository
//!
//! Reservations and booking reports.
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_booked(hotel, room, date)?                                         │
//! │       │                                                                 │
//! │       ├── yes → handler asks for another date                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  book(): INSERT ... RETURNING, joined with Rooms for the price         │
//! │       │                                                                 │
//! │       ├── 23505 (someone booked it meanwhile) → DbError::UniqueViolation│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Reservation                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::session::Session;
use crate::statement::Statement;
use hotel_core::{BookingSummary, HotelBooking, Id, RegularCustomer, Reservation};

/// Repository for the `RoomBookings` table.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    session: Session,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(session: Session) -> Self {
        BookingRepository { session }
    }

    /// Whether the room already has a booking on `date`.
    pub async fn is_booked(&self, hotel_id: Id, room_number: Id, date: NaiveDate) -> DbResult<bool> {
        let stmt = Statement::new(
            "SELECT bookingDate FROM RoomBookings \
             WHERE roomNumber = $1 AND hotelID = $2 AND bookingDate = $3",
        )
        .bind(room_number)
        .bind(hotel_id)
        .bind(date);

        Ok(self.session.query_count(&stmt).await? > 0)
    }

    /// Books a room for a customer.
    ///
    /// ## Returns
    /// * `Ok(Reservation)` - The booking with the room's price
    /// * `Err(DbError::UniqueViolation)` - The room is taken that day
    pub async fn book(
        &self,
        customer_id: Id,
        hotel_id: Id,
        room_number: Id,
        date: NaiveDate,
    ) -> DbResult<Reservation> {
        debug!(customer_id, hotel_id, room_number, %date, "Booking room");

        let reservation: Reservation = self
            .session
            .fetch_one(&book_statement(customer_id, hotel_id, room_number, date))
            .await?;

        info!(booking_id = reservation.booking_id, "Room booked");
        Ok(reservation)
    }

    /// A customer's latest bookings, newest first.
    pub async fn recent_for_customer(
        &self,
        customer_id: Id,
        limit: i64,
    ) -> DbResult<Vec<BookingSummary>> {
        let stmt = Statement::new(
            "SELECT b.bookingID::int4 AS booking_id, b.hotelID::int4 AS hotel_id, \
                    b.roomNumber::int4 AS room_number, b.bookingDate::date AS booking_date, \
                    r.price::int4 AS price \
             FROM RoomBookings b \
             JOIN Rooms r ON r.hotelID = b.hotelID AND r.roomNumber = b.roomNumber \
             WHERE b.customerID = $1 \
             ORDER BY b.bookingID DESC LIMIT $2",
        )
        .bind(customer_id)
        .bind(limit);

        self.session.fetch_all(&stmt).await
    }

    /// Bookings at every hotel a manager runs, between two dates inclusive,
    /// newest first.
    pub async fn for_manager_between(
        &self,
        manager_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<HotelBooking>> {
        debug!(manager_id, %start, %end, "Listing hotel bookings");

        let stmt = Statement::new(
            "SELECT b.bookingID::int4 AS booking_id, u.name::text AS customer_name, \
                    b.hotelID::int4 AS hotel_id, b.roomNumber::int4 AS room_number, \
                    b.bookingDate::date AS booking_date, r.price::int4 AS price \
             FROM RoomBookings b \
             JOIN Hotel h ON h.hotelID = b.hotelID \
             JOIN Rooms r ON r.hotelID = b.hotelID AND r.roomNumber = b.roomNumber \
             JOIN Users u ON u.userID = b.customerID \
             WHERE h.managerUserID = $1 AND b.bookingDate BETWEEN $2 AND $3 \
             ORDER BY b.bookingDate DESC, b.bookingID DESC",
        )
        .bind(manager_id)
        .bind(start)
        .bind(end);

        self.session.fetch_all(&stmt).await
    }

    /// Customers with the most bookings at a hotel.
    pub async fn regular_customers(&self, hotel_id: Id, limit: i64) -> DbResult<Vec<RegularCustomer>> {
        let stmt = Statement::new(
            "SELECT u.userID::int4 AS user_id, u.name::text AS name, COUNT(*) AS bookings \
             FROM Users u \
             JOIN RoomBookings b ON b.customerID = u.userID \
             WHERE b.hotelID = $1 \
             GROUP BY u.userID, u.name \
             ORDER BY bookings DESC, u.userID \
             LIMIT $2",
        )
        .bind(hotel_id)
        .bind(limit);

        self.session.fetch_all(&stmt).await
    }
}

fn book_statement(customer_id: Id, hotel_id: Id, room_number: Id, date: NaiveDate) -> Statement {
    Statement::new(
        "WITH b AS ( \
             INSERT INTO RoomBookings (customerID, hotelID, roomNumber, bookingDate) \
             VALUES ($1, $2, $3, $4) \
             RETURNING bookingID, customerID, hotelID, roomNumber, bookingDate \
         ) \
         SELECT b.bookingID::int4 AS booking_id, b.customerID::int4 AS customer_id, \
                b.hotelID::int4 AS hotel_id, b.roomNumber::int4 AS room_number, \
                b.bookingDate::date AS booking_date, r.price::int4 AS price \
         FROM b JOIN Rooms r ON r.hotelID = b.hotelID AND r.roomNumber = b.roomNumber",
    )
    .bind(customer_id)
    .bind(hotel_id)
    .bind(room_number)
    .bind(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Param;

    #[test]
    fn test_book_statement_is_single_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let stmt = book_statement(9, 3, 101, date);

        assert!(stmt.sql().starts_with("WITH b AS"));
        assert!(stmt.sql().contains("RETURNING bookingID"));
        assert_eq!(
            stmt.params(),
            &[Param::Int(9), Param::Int(3), Param::Int(101), Param::Date(date)]
        );
    }
}
