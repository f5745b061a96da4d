//! # Geometry
//!
//! Straight-line distance between two (latitude, longitude) pairs.
//!
//! Coordinates are treated as plain planar units, not degrees on a sphere:
//! "within 30 units" means a Euclidean distance below 30. The SQL filter in
//! hotel-db computes the same expression so both sides agree.

use serde::{Deserialize, Serialize};

/// A point given by latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Euclidean distance to another point.
    ///
    /// ## Example
    /// ```rust
    /// use hotel_core::GeoPoint;
    ///
    /// let a = GeoPoint::new(0.0, 0.0);
    /// let b = GeoPoint::new(3.0, 4.0);
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// ```
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlong = self.longitude - other.longitude;
        (dlat * dlat + dlong * dlong).sqrt()
    }

    /// Whether `other` lies strictly inside `radius`.
    pub fn within(&self, other: &GeoPoint, radius: f64) -> bool {
        self.distance_to(other) < radius
    }
}
