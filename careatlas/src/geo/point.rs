//! Validated geographic coordinate type

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors that can occur when constructing a [`Point`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude is outside valid range (-90 to 90)
    #[error("invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),

    /// Longitude is outside valid range (-180 to 180)
    #[error("invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),
}

/// A geographic point in decimal degrees.
///
/// Points are validated on construction; a `Point` that exists always
/// carries an in-range latitude and longitude. Out-of-range inputs are
/// rejected, never clamped.
///
/// # Examples
///
/// ```
/// use careatlas::geo::Point;
///
/// let accra = Point::new(5.6037, -0.1870).unwrap();
/// assert!((accra.lat - 5.6037).abs() < 1e-9);
///
/// assert!(Point::new(200.0, 300.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in decimal degrees (north positive).
    pub lat: f64,
    /// Longitude in decimal degrees (east positive).
    pub lon: f64,
}

impl Point {
    /// Create a new point, validating both coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(GeoError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(GeoError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Midpoint of two points by simple coordinate averaging.
    ///
    /// Adequate for labeling small bounding boxes; not a geodesic midpoint.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point {
            lat: (a.lat + b.lat) / 2.0,
            lon: (a.lon + b.lon) / 2.0,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lon)
    }
}
