//! Point-to-point distance queries

use super::{round2, PlaceRef};
use crate::geo::haversine_km;
use crate::resolver::{LocationResolver, ResolutionError};
use serde::Serialize;

/// Result of a distance query.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceResult {
    pub from: PlaceRef,
    pub to: PlaceRef,
    pub distance_km: f64,
    pub summary: String,
}

/// Great-circle distance between two resolvable locations.
///
/// Either endpoint may be a place name or a "lat,lon" pair.
///
/// # Errors
///
/// [`ResolutionError`] if either endpoint cannot be resolved.
pub fn calculate_distance(
    resolver: &LocationResolver,
    from: &str,
    to: &str,
) -> Result<DistanceResult, ResolutionError> {
    let from_point = resolver.resolve(from)?.point;
    let to_point = resolver.resolve(to)?.point;

    let distance_km = round2(haversine_km(from_point, to_point));

    Ok(DistanceResult {
        from: PlaceRef {
            location: from.to_string(),
            lat: from_point.lat,
            lng: from_point.lon,
        },
        to: PlaceRef {
            location: to.to_string(),
            lat: to_point.lat,
            lng: to_point.lon,
        },
        distance_km,
        summary: format!(
            "Distance from {} to {}: {} km (straight-line / great-circle).",
            from, to, distance_km
        ),
    })
}
