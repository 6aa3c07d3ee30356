//! Query-time analysis operations
//!
//! Each operation issues exactly one read from the facility store,
//! resolves a usable coordinate per row through the shared cascade in
//! [`locate`], and computes great-circle distances. Rows that cannot be
//! resolved are dropped from that result set, never raised — an
//! availability-over-completeness policy shared by every batch
//! operation here.

mod census;
mod coverage;
mod distance;
mod export;
mod locate;
mod proximity;

pub use census::{CensusParams, CensusResult, FacilityCensus, RegionCount, SampleFacility};
pub use coverage::{
    CoverageGapAnalyzer, CoverageGapResult, CoverageParams, GapCell, Severity, DEFAULT_GRID_STEP_DEG,
};
pub use distance::{calculate_distance, DistanceResult};
pub use export::{
    ExportParams, ExportResult, Feature, FeatureCollection, GeocodeExporter, Geometry,
};
pub use locate::resolve_facility_point;
pub use proximity::{NearbyFacility, ProximityParams, ProximityResult, ProximitySearch};

use crate::resolver::ResolutionError;
use crate::store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A caller-supplied location string could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The facility store read failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A named place with its resolved coordinate, echoed back in results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRef {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
}

/// Round to 2 decimal places (~10 m at the equator; plenty for km
/// figures shown to users).
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 4 decimal places (grid-point coordinates).
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
