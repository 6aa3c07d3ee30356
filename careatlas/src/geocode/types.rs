//! Geocoding provider types and traits

use crate::geo::Point;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur during a provider call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocoderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),
    /// Response payload could not be parsed or carried invalid data
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
    /// Provider requires an API key that was not configured
    #[error("geocoding API key is not set (export {0})")]
    MissingApiKey(&'static str),
}

/// A geocoding provider's confidence classification for a result.
///
/// The first three tiers form the "precise" allow-list; anything else a
/// provider reports maps to `Approximate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionTier {
    /// Street-address accurate.
    Rooftop,
    /// Interpolated between two known points on a road segment.
    RangeInterpolated,
    /// Centroid of a building or area feature.
    GeometricCenter,
    /// Region-level or unknown accuracy.
    Approximate,
}

impl PrecisionTier {
    /// Whether this tier is in the precise allow-list.
    pub fn is_precise(self) -> bool {
        !matches!(self, PrecisionTier::Approximate)
    }

    /// Map a provider's location-type string onto a tier.
    ///
    /// Unknown strings are treated as `Approximate` so they can only be
    /// kept through the cascade's fallback slot.
    pub fn from_location_type(location_type: &str) -> Self {
        match location_type {
            "ROOFTOP" => PrecisionTier::Rooftop,
            "RANGE_INTERPOLATED" => PrecisionTier::RangeInterpolated,
            "GEOMETRIC_CENTER" => PrecisionTier::GeometricCenter,
            _ => PrecisionTier::Approximate,
        }
    }
}

/// A single geocoding result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeHit {
    pub point: Point,
    pub tier: PrecisionTier,
}

/// Trait for blocking geocoding providers.
///
/// `Ok(None)` means the provider answered but had no result for the
/// query; `Err` means the call itself failed. The cascade treats both
/// as "no result for this candidate".
pub trait GeocodeProvider: Send + Sync {
    /// Geocode a single free-text query.
    fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocoderError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Async counterpart of [`GeocodeProvider`].
///
/// Preferred for bulk ingestion, where the caller fans out across
/// facilities; within one facility the cascade still awaits calls
/// strictly in sequence.
pub trait AsyncGeocodeProvider: Send + Sync {
    /// Geocode a single free-text query.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodeHit>, GeocoderError>> + Send;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
