//! Coverage-gap (medical desert) detection
//!
//! Sweeps a regular lat/lon grid over the target bounding box and, for
//! every grid point, finds the nearest facility offering the requested
//! capability. Points farther than the gap threshold become gap cells.
//!
//! The nearest-facility scan is a deliberate O(grid × facilities)
//! brute force: facility counts are in the hundreds and grids in the
//! thousands of cells. A spatial index could replace the inner loop as
//! a pure optimization so long as the nearest-distance values are
//! unchanged.

use super::locate::resolve_facility_point;
use super::{round2, round4, AnalysisError};
use crate::gazetteer::{bounds_for_region, title_case, Gazetteer};
use crate::geo::{haversine_km, Point};
use crate::store::FacilityStore;
use serde::Serialize;
use tracing::debug;

/// Grid resolution in degrees (~55 km); independent of data density.
pub const DEFAULT_GRID_STEP_DEG: f64 = 0.5;

/// Parameters for a coverage-gap analysis.
#[derive(Debug, Clone)]
pub struct CoverageParams {
    /// Capability/specialty filter (substring, broad recall).
    pub specialty: String,
    /// Minimum nearest-facility distance for a point to count as a gap.
    pub min_gap_km: f64,
    /// Optional region to constrain the grid.
    pub region: Option<String>,
    /// Maximum gap cells returned.
    pub limit: usize,
}

impl CoverageParams {
    pub fn new(specialty: impl Into<String>) -> Self {
        Self {
            specialty: specialty.into(),
            min_gap_km: 50.0,
            region: None,
            limit: 10,
        }
    }
}

/// Gap severity, relative to the requested threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    Critical,
}

/// A grid point lacking coverage.
#[derive(Debug, Clone, Serialize)]
pub struct GapCell {
    pub lat: f64,
    pub lng: f64,
    /// Nearest gazetteer city, for readability.
    pub nearest_city: String,
    /// Closest matching facility, if any exist at all.
    pub nearest_facility_name: Option<String>,
    pub nearest_facility_distance_km: f64,
    pub severity: Severity,
}

/// Result of a coverage-gap analysis.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageGapResult {
    pub specialty: String,
    pub region: Option<String>,
    pub min_gap_km: f64,
    /// Facilities offering the capability (after coordinate resolution).
    pub total_facilities_found: usize,
    /// Gap cells, worst first, truncated to `limit`.
    pub gaps: Vec<GapCell>,
    pub gap_count: usize,
    pub summary: String,
}

/// Grid-based coverage-gap detection over a facility store.
pub struct CoverageGapAnalyzer<'a, S: FacilityStore> {
    store: &'a S,
    gazetteer: Gazetteer,
    grid_step_deg: f64,
}

impl<'a, S: FacilityStore> CoverageGapAnalyzer<'a, S> {
    pub fn new(store: &'a S, gazetteer: Gazetteer) -> Self {
        Self {
            store,
            gazetteer,
            grid_step_deg: DEFAULT_GRID_STEP_DEG,
        }
    }

    /// Override the grid resolution (test hook / tuning).
    pub fn with_grid_step(mut self, step_deg: f64) -> Self {
        self.grid_step_deg = step_deg;
        self
    }

    /// Run the analysis.
    ///
    /// # Errors
    ///
    /// Fails only on a store read failure. Zero matching facilities is
    /// not an error: the whole target area is reported as one gap.
    pub fn run(&self, params: &CoverageParams) -> Result<CoverageGapResult, AnalysisError> {
        let rows = self
            .store
            .search(Some(&params.specialty), params.region.as_deref())?;

        let facilities: Vec<(String, Point)> = rows
            .into_iter()
            .filter_map(|row| {
                resolve_facility_point(&row, &self.gazetteer).map(|point| (row.name, point))
            })
            .collect();

        debug!(
            specialty = %params.specialty,
            resolved = facilities.len(),
            "coverage analysis resolved facilities"
        );

        let bounds = bounds_for_region(params.region.as_deref());
        let region_label = match &params.region {
            Some(region) => format!(" in {}", region),
            None => " in Ghana".to_string(),
        };

        if facilities.is_empty() {
            // The entire target area is a gap; report it as one maximal
            // cell rather than an empty list.
            let center = bounds.center();
            let gap = GapCell {
                lat: round4(center.lat),
                lng: round4(center.lon),
                nearest_city: self.nearest_city_label(center),
                nearest_facility_name: None,
                nearest_facility_distance_km: round2(bounds.half_diagonal_km()),
                severity: Severity::Critical,
            };
            let summary = format!(
                "No facilities found offering '{}'{}. The entire area is a coverage gap \
                 for this service.",
                params.specialty, region_label
            );
            return Ok(CoverageGapResult {
                specialty: params.specialty.clone(),
                region: params.region.clone(),
                min_gap_km: params.min_gap_km,
                total_facilities_found: 0,
                gaps: vec![gap],
                gap_count: 1,
                summary,
            });
        }

        let mut gaps: Vec<GapCell> = Vec::new();
        let mut lat = bounds.lat_min;
        while lat <= bounds.lat_max {
            let mut lng = bounds.lon_min;
            while lng <= bounds.lon_max {
                let grid_point = Point { lat, lon: lng };

                let (nearest_name, nearest_km) = facilities
                    .iter()
                    .map(|(name, point)| (name, haversine_km(grid_point, *point)))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(name, dist)| (name.clone(), dist))
                    .expect("facilities is non-empty");

                if nearest_km >= params.min_gap_km {
                    gaps.push(GapCell {
                        lat: round4(lat),
                        lng: round4(lng),
                        nearest_city: self.nearest_city_label(grid_point),
                        nearest_facility_name: Some(nearest_name),
                        nearest_facility_distance_km: round2(nearest_km),
                        severity: severity_for(nearest_km, params.min_gap_km),
                    });
                }

                lng += self.grid_step_deg;
            }
            lat += self.grid_step_deg;
        }

        // Worst gaps first
        gaps.sort_by(|a, b| {
            b.nearest_facility_distance_km
                .total_cmp(&a.nearest_facility_distance_km)
        });
        gaps.truncate(params.limit);

        let mut summary = format!(
            "Found {} coverage gap areas where '{}' is absent within {} km{}. \
             {} facilities offer this service.",
            gaps.len(),
            params.specialty,
            params.min_gap_km,
            region_label,
            facilities.len()
        );
        if let Some(worst) = gaps.first() {
            summary.push_str(&format!(
                " Worst gap: near {} ({} km to the nearest facility).",
                worst.nearest_city, worst.nearest_facility_distance_km
            ));
        }

        Ok(CoverageGapResult {
            specialty: params.specialty.clone(),
            region: params.region.clone(),
            min_gap_km: params.min_gap_km,
            total_facilities_found: facilities.len(),
            gap_count: gaps.len(),
            gaps,
            summary,
        })
    }

    fn nearest_city_label(&self, point: Point) -> String {
        self.gazetteer
            .nearest_city(point)
            .map(|(name, _)| title_case(name))
            .unwrap_or_else(|| "Unknown area".to_string())
    }
}

/// Severity rule: strictly beyond twice the threshold is critical; the
/// boundary itself is moderate.
fn severity_for(nearest_km: f64, min_gap_km: f64) -> Severity {
    if nearest_km > min_gap_km * 2.0 {
        Severity::Critical
    } else {
        Severity::Moderate
    }
}
