//! # Room Repository
//!
//! Room availability, room edits and the room update log.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::session::Session;
use crate::statement::Statement;
use hotel_core::{Id, Room, RoomUpdate};

const ROOM_COLUMNS: &str = "hotelID::int4 AS hotel_id, roomNumber::int4 AS room_number, \
                            price::int4 AS price, imageURL::text AS image_url";

/// Repository for the `Rooms` and `RoomUpdatesLog` tables.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    session: Session,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(session: Session) -> Self {
        RoomRepository { session }
    }

    /// Whether the room exists in the hotel.
    pub async fn exists(&self, hotel_id: Id, room_number: Id) -> DbResult<bool> {
        let stmt =
            Statement::new("SELECT roomNumber FROM Rooms WHERE roomNumber = $1 AND hotelID = $2")
                .bind(room_number)
                .bind(hotel_id);

        Ok(self.session.query_count(&stmt).await? > 0)
    }

    /// Rooms of a hotel with no booking on `date`, by room number.
    pub async fn available_on(&self, hotel_id: Id, date: NaiveDate) -> DbResult<Vec<Room>> {
        debug!(hotel_id, %date, "Listing available rooms");

        self.session
            .fetch_all(&available_statement(hotel_id, date))
            .await
    }

    /// Reads one room.
    pub async fn get(&self, hotel_id: Id, room_number: Id) -> DbResult<Option<Room>> {
        let stmt = Statement::new(format!(
            "SELECT {} FROM Rooms WHERE hotelID = $1 AND roomNumber = $2",
            ROOM_COLUMNS
        ))
        .bind(hotel_id)
        .bind(room_number);

        self.session.fetch_optional(&stmt).await
    }

    /// Sets a new price and returns the updated room.
    pub async fn update_price(&self, hotel_id: Id, room_number: Id, price: i32) -> DbResult<Room> {
        debug!(hotel_id, room_number, price, "Updating room price");

        let stmt =
            Statement::new("UPDATE Rooms SET price = $1 WHERE hotelID = $2 AND roomNumber = $3")
                .bind(price)
                .bind(hotel_id)
                .bind(room_number);

        self.apply_update(&stmt, hotel_id, room_number).await
    }

    /// Sets a new image URL and returns the updated room.
    pub async fn update_image_url(
        &self,
        hotel_id: Id,
        room_number: Id,
        image_url: &str,
    ) -> DbResult<Room> {
        debug!(hotel_id, room_number, "Updating room image URL");

        let stmt =
            Statement::new("UPDATE Rooms SET imageURL = $1 WHERE hotelID = $2 AND roomNumber = $3")
                .bind(image_url)
                .bind(hotel_id)
                .bind(room_number);

        self.apply_update(&stmt, hotel_id, room_number).await
    }

    /// Latest update log entries written for a manager, newest first.
    pub async fn recent_updates(&self, manager_id: Id, limit: i64) -> DbResult<Vec<RoomUpdate>> {
        let stmt = Statement::new(
            "SELECT updateNumber::int4 AS update_number, managerID::int4 AS manager_id, \
                    hotelID::int4 AS hotel_id, roomNumber::int4 AS room_number, \
                    updatedOn::timestamp AS updated_on \
             FROM RoomUpdatesLog WHERE managerID = $1 \
             ORDER BY updatedOn DESC LIMIT $2",
        )
        .bind(manager_id)
        .bind(limit);

        self.session.fetch_all(&stmt).await
    }

    async fn apply_update(&self, stmt: &Statement, hotel_id: Id, room_number: Id) -> DbResult<Room> {
        let room_key = format!("{}/{}", hotel_id, room_number);

        if self.session.execute(stmt).await? == 0 {
            return Err(DbError::not_found("Room", room_key));
        }

        self.get(hotel_id, room_number)
            .await?
            .ok_or_else(|| DbError::not_found("Room", room_key))
    }
}

fn available_statement(hotel_id: Id, date: NaiveDate) -> Statement {
    Statement::new(format!(
        "SELECT {} FROM Rooms r \
         WHERE r.hotelID = $1 \
           AND NOT EXISTS (SELECT 1 FROM RoomBookings b \
                           WHERE b.hotelID = r.hotelID \
                             AND b.roomNumber = r.roomNumber \
                             AND b.bookingDate = $2) \
         ORDER BY r.roomNumber",
        ROOM_COLUMNS
    ))
    .bind(hotel_id)
    .bind(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Param;

    #[test]
    fn test_available_statement_matches_booking_on_same_hotel() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let stmt = available_statement(3, date);

        assert!(stmt.sql().contains("b.hotelID = r.hotelID"));
        assert!(stmt.sql().contains("ORDER BY r.roomNumber"));
        assert_eq!(stmt.params(), &[Param::Int(3), Param::Date(date)]);
    }
}
