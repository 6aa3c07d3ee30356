//! Free-text location resolution
//!
//! Turns a user-supplied location string into a [`Point`]. Two paths:
//!
//! 1. **Coordinate fast path** — `"lat,lon"` with both numbers in range
//!    resolves directly, with no gazetteer lookup. Out-of-range numeric
//!    pairs are never clamped; they fall through to name resolution and
//!    fail there.
//! 2. **Gazetteer lookup** — the tiered strategy cascade in
//!    [`crate::gazetteer`].
//!
//! Failures surface as [`ResolutionError`] carrying a sample of known
//! city names so the caller can correct the input. Never silently
//! defaulted to a guessed location.

use crate::gazetteer::Gazetteer;
use crate::geo::{Point, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use thiserror::Error;

/// A location string that could not be resolved.
#[derive(Debug, Clone, Error)]
#[error(
    "could not resolve location '{input}'; try coordinates (lat,lon) or a known \
     city/landmark. Known cities include: {known_sample}..."
)]
pub struct ResolutionError {
    /// The text that failed to resolve.
    pub input: String,
    /// Comma-separated sample of known city names.
    pub known_sample: String,
}

/// How a location string was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// Parsed directly as a coordinate pair.
    Coordinates,
    /// Matched a gazetteer entry.
    Gazetteer,
}

/// A resolved location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub point: Point,
    pub via: ResolvedVia,
}

/// Resolves free-text locations against a gazetteer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationResolver {
    gazetteer: Gazetteer,
}

impl LocationResolver {
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self { gazetteer }
    }

    /// Resolve a location string to a point.
    ///
    /// # Errors
    ///
    /// [`ResolutionError`] if the text is neither an in-range coordinate
    /// pair nor a known place name.
    pub fn resolve(&self, text: &str) -> Result<Resolved, ResolutionError> {
        if let Some(point) = parse_coordinate_pair(text) {
            return Ok(Resolved {
                point,
                via: ResolvedVia::Coordinates,
            });
        }

        match self.gazetteer.lookup(text) {
            Some(hit) => Ok(Resolved {
                point: hit.point,
                via: ResolvedVia::Gazetteer,
            }),
            None => Err(ResolutionError {
                input: text.to_string(),
                known_sample: self.gazetteer.sample_cities(15).join(", "),
            }),
        }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }
}

/// Parse `"lat,lon"` into a point, requiring both numbers in range.
///
/// Returns `None` for anything else — including numeric pairs outside
/// the valid ranges, which must not be clamped.
fn parse_coordinate_pair(text: &str) -> Option<Point> {
    let (lat_s, lon_s) = text.split_once(',')?;
    let lat: f64 = lat_s.trim().parse().ok()?;
    let lon: f64 = lon_s.trim().parse().ok()?;
    if (MIN_LAT..=MAX_LAT).contains(&lat) && (MIN_LON..=MAX_LON).contains(&lon) {
        // In-range by construction
        Some(Point { lat, lon })
    } else {
        None
    }
}
