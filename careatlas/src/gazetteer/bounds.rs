//! Region bounding boxes for coverage-grid generation
//!
//! Approximate boxes for Ghana's administrative regions plus the
//! whole-country fallback. Region lookup is exact match first, then
//! substring in either direction, mirroring the gazetteer's fuzzy rule.

use crate::geo::{haversine_km, Point};

/// An axis-aligned lat/lon bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Center point of the box.
    pub fn center(&self) -> Point {
        Point {
            lat: (self.lat_min + self.lat_max) / 2.0,
            lon: (self.lon_min + self.lon_max) / 2.0,
        }
    }

    /// Great-circle distance from the center to a corner, in kilometers.
    ///
    /// An upper bound on how far any point in the box lies from the center.
    pub fn half_diagonal_km(&self) -> f64 {
        let corner = Point {
            lat: self.lat_max,
            lon: self.lon_max,
        };
        haversine_km(self.center(), corner)
    }
}

/// Whole-country bounding box (grid fallback when no region is given).
pub const COUNTRY_BOUNDS: BoundingBox = BoundingBox {
    lat_min: 4.5,
    lat_max: 11.2,
    lon_min: -3.3,
    lon_max: 1.3,
};

const fn bb(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> BoundingBox {
    BoundingBox {
        lat_min,
        lat_max,
        lon_min,
        lon_max,
    }
}

/// Approximate bounding boxes for Ghana's regions.
pub const REGION_BOUNDS: &[(&str, BoundingBox)] = &[
    ("northern", bb(8.5, 10.5, -2.5, 0.5)),
    ("upper east", bb(10.2, 11.2, -1.3, 0.0)),
    ("upper west", bb(9.6, 11.0, -3.0, -1.5)),
    ("ashanti", bb(6.0, 7.5, -2.5, -0.5)),
    ("greater accra", bb(5.3, 6.0, -0.5, 0.5)),
    ("western", bb(4.5, 6.0, -3.3, -1.5)),
    ("eastern", bb(5.5, 7.0, -1.5, 0.5)),
    ("central", bb(5.0, 6.0, -2.0, -0.5)),
    ("volta", bb(5.5, 8.5, -0.5, 1.2)),
    ("brong-ahafo", bb(6.5, 8.5, -3.0, -0.5)),
    ("bono", bb(7.0, 8.5, -3.0, -1.5)),
    ("bono east", bb(7.0, 8.5, -1.5, 0.0)),
    ("ahafo", bb(6.5, 7.5, -3.0, -1.5)),
    ("savannah", bb(8.0, 10.0, -2.5, -0.5)),
    ("north east", bb(10.0, 11.0, -0.5, 0.5)),
    ("oti", bb(7.5, 9.0, -0.5, 1.0)),
    ("western north", bb(5.5, 7.0, -3.0, -2.0)),
];

/// Resolve the grid bounding box for an optional region name.
///
/// Exact match wins; otherwise the first table entry where either string
/// contains the other. Unknown or absent regions get the country box.
pub fn bounds_for_region(region: Option<&str>) -> BoundingBox {
    if let Some(region) = region {
        let key = region.trim().to_lowercase();
        if !key.is_empty() {
            if let Some((_, bounds)) = REGION_BOUNDS.iter().find(|(name, _)| *name == key) {
                return *bounds;
            }
            if let Some((_, bounds)) = REGION_BOUNDS
                .iter()
                .find(|(name, _)| name.contains(&key) || key.contains(name))
            {
                return *bounds;
            }
        }
    }
    COUNTRY_BOUNDS
}
