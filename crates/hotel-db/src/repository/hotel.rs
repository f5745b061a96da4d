//! # Hotel Repository
//!
//! Hotel search by distance and ownership checks.
//!
//! ## Radius Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User enters (lat, long)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQL: sqrt((latitude - lat)^2 + (longitude - long)^2) < radius         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Rust: sort the matches nearest-first with GeoPoint::distance_to       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::session::Session;
use crate::statement::Statement;
use hotel_core::{GeoPoint, Hotel, Id};

/// Repository for the `Hotel` table.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    session: Session,
}

impl HotelRepository {
    /// Creates a new HotelRepository.
    pub fn new(session: Session) -> Self {
        HotelRepository { session }
    }

    /// Hotels strictly closer than `radius` to `origin`, nearest first.
    pub async fn within_radius(&self, origin: GeoPoint, radius: f64) -> DbResult<Vec<Hotel>> {
        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            radius,
            "Searching hotels"
        );

        let mut hotels: Vec<Hotel> = self
            .session
            .fetch_all(&within_radius_statement(origin, radius))
            .await?;

        sort_nearest_first(&mut hotels, origin);

        debug!(count = hotels.len(), "Hotel search returned");
        Ok(hotels)
    }

    /// Whether a hotel with this ID exists.
    pub async fn exists(&self, hotel_id: Id) -> DbResult<bool> {
        let stmt = Statement::new("SELECT hotelID FROM Hotel WHERE hotelID = $1").bind(hotel_id);

        Ok(self.session.query_count(&stmt).await? > 0)
    }

    /// Whether `manager_id` manages `hotel_id`.
    pub async fn is_managed_by(&self, hotel_id: Id, manager_id: Id) -> DbResult<bool> {
        let stmt =
            Statement::new("SELECT hotelID FROM Hotel WHERE hotelID = $1 AND managerUserID = $2")
                .bind(hotel_id)
                .bind(manager_id);

        Ok(self.session.query_count(&stmt).await? > 0)
    }
}

fn within_radius_statement(origin: GeoPoint, radius: f64) -> Statement {
    Statement::new(
        "SELECT hotelID::int4 AS hotel_id, hotelName::text AS hotel_name, \
                dateEstablished::date AS date_established, \
                latitude::float8 AS latitude, longitude::float8 AS longitude \
         FROM Hotel \
         WHERE sqrt(power(latitude::float8 - $1, 2) + power(longitude::float8 - $2, 2)) < $3",
    )
    .bind(origin.latitude)
    .bind(origin.longitude)
    .bind(radius)
}

/// Orders hotels by distance from `origin`, then by ID.
pub fn sort_nearest_first(hotels: &mut [Hotel], origin: GeoPoint) {
    hotels.sort_by(|a, b| {
        origin
            .distance_to(&a.location())
            .total_cmp(&origin.distance_to(&b.location()))
            .then(a.hotel_id.cmp(&b.hotel_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Param;
    use chrono::NaiveDate;

    fn hotel(id: Id, latitude: f64, longitude: f64) -> Hotel {
        Hotel {
            hotel_id: id,
            hotel_name: format!("Hotel {}", id),
            date_established: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_sort_nearest_first() {
        let mut hotels = vec![hotel(1, 10.0, 0.0), hotel(2, 1.0, 1.0), hotel(3, -1.0, -1.0)];

        sort_nearest_first(&mut hotels, GeoPoint::new(0.0, 0.0));

        let ids: Vec<Id> = hotels.iter().map(|h| h.hotel_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_radius_statement_binds_origin_and_radius() {
        let stmt = within_radius_statement(GeoPoint::new(33.9, -117.4), 30.0);

        assert_eq!(
            stmt.params(),
            &[Param::Float(33.9), Param::Float(-117.4), Param::Float(30.0)]
        );
        assert!(stmt.sql().contains("< $3"));
    }
}
