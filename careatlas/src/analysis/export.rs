//! GeoJSON facility export
//!
//! Bulk-resolves facilities into an RFC 7946 FeatureCollection of Point
//! features for map rendering. Facilities without a resolvable
//! coordinate are skipped and counted, not erred.
//!
//! Co-located markers can optionally be spread on a golden-angle
//! (Fermat) spiral so they stop overlapping on a map. The spread is a
//! rendering concern only: it alters exported feature geometry, never
//! any distance computation, and the true coordinate is preserved in
//! the feature properties.

use super::locate::resolve_facility_point;
use super::AnalysisError;
use crate::gazetteer::Gazetteer;
use crate::geo::Point;
use crate::store::FacilityStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

/// Parameters for a GeoJSON export.
#[derive(Debug, Clone, Default)]
pub struct ExportParams {
    /// Optional region filter (substring).
    pub region: Option<String>,
    /// Optional facility-type filter (substring).
    pub facility_type: Option<String>,
    /// Spread co-located markers on a spiral (display only).
    pub spread_markers: bool,
}

/// RFC 7946 Point geometry.
#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]` per the GeoJSON position order.
    pub coordinates: [f64; 2],
}

/// RFC 7946 Feature with free-form properties.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Geometry,
    pub properties: Value,
}

/// RFC 7946 FeatureCollection.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

/// Result of a GeoJSON export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub geojson: FeatureCollection,
    pub total_geocoded: usize,
    pub total_skipped: usize,
    pub summary: String,
}

/// Bulk facility → GeoJSON exporter.
pub struct GeocodeExporter<'a, S: FacilityStore> {
    store: &'a S,
    gazetteer: Gazetteer,
}

impl<'a, S: FacilityStore> GeocodeExporter<'a, S> {
    pub fn new(store: &'a S, gazetteer: Gazetteer) -> Self {
        Self { store, gazetteer }
    }

    /// Run the export.
    ///
    /// # Errors
    ///
    /// Fails only on a store read failure.
    pub fn run(&self, params: &ExportParams) -> Result<ExportResult, AnalysisError> {
        let rows = self.store.search(None, params.region.as_deref())?;

        let type_needle = params
            .facility_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        let mut placed: Vec<(Point, Value)> = Vec::new();
        let mut skipped = 0usize;

        for row in rows {
            if let Some(needle) = &type_needle {
                if !row.facility_type.to_lowercase().contains(needle) {
                    continue;
                }
            }

            let Some(point) = resolve_facility_point(&row, &self.gazetteer) else {
                skipped += 1;
                continue;
            };

            let properties = json!({
                "id": row.id,
                "name": row.name,
                "city": row.city,
                "region": row.region,
                "address": row.address_line1,
                "facility_type": row.facility_type,
                "specialties": row.specialties,
                "procedures": row.procedures,
                "equipment": row.equipment,
                "capabilities": row.capabilities,
                "description": row.description,
                "phone": row.phone,
                "geocode_status": row.geocode_status,
                "lat": point.lat,
                "lng": point.lon,
            });
            placed.push((point, properties));
        }

        let geocoded = placed.len();
        debug!(geocoded = geocoded, skipped = skipped, "geojson export resolved facilities");

        if params.spread_markers {
            spread_colocated(&mut placed);
        }

        let features = placed
            .into_iter()
            .map(|(point, properties)| Feature {
                kind: "Feature",
                geometry: Geometry {
                    kind: "Point",
                    coordinates: [point.lon, point.lat],
                },
                properties,
            })
            .collect();

        let summary = format!(
            "Geocoded {} facilities. {} could not be geocoded (unknown city). \
             Data returned in GeoJSON format ready for map rendering.",
            geocoded, skipped
        );

        Ok(ExportResult {
            geojson: FeatureCollection {
                kind: "FeatureCollection",
                features,
            },
            total_geocoded: geocoded,
            total_skipped: skipped,
            summary,
        })
    }
}

/// Golden angle in radians (~137.508°).
fn golden_angle() -> f64 {
    std::f64::consts::PI * (3.0 - 5.0_f64.sqrt())
}

/// Maximum spiral radius in degrees, stepped by cluster size.
fn max_spread_radius_deg(cluster_size: usize) -> f64 {
    match cluster_size {
        0..=5 => 0.01,    // ~1.1 km
        6..=20 => 0.025,  // ~2.8 km
        21..=50 => 0.045, // ~5.0 km
        51..=100 => 0.065, // ~7.2 km
        _ => 0.09,        // ~10 km
    }
}

/// The i-th of n points on a Fermat spiral around a base coordinate.
///
/// Deterministic, overlap-free, and visually natural; longitude offsets
/// are corrected by cos(latitude) so clusters stay roughly circular.
fn spiral_offset(index: usize, total: usize, base: Point) -> Point {
    if total <= 1 {
        return base;
    }

    let max_r = max_spread_radius_deg(total);
    let r = max_r * (index as f64 / total as f64).sqrt();
    let theta = index as f64 * golden_angle();
    let lat_off = r * theta.cos();
    let lng_off = r * theta.sin() / base.lat.to_radians().cos().max(0.01);

    Point::new(base.lat + lat_off, base.lon + lng_off).unwrap_or(base)
}

/// Spread groups of features sharing the exact same coordinate.
fn spread_colocated(placed: &mut [(Point, Value)]) {
    let mut groups: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (idx, (point, _)) in placed.iter().enumerate() {
        // Group on microdegree-quantized coordinates
        let key = (
            (point.lat * 1_000_000.0).round() as i64,
            (point.lon * 1_000_000.0).round() as i64,
        );
        groups.entry(key).or_default().push(idx);
    }

    for indices in groups.into_values() {
        let total = indices.len();
        if total <= 1 {
            continue;
        }
        for (i, idx) in indices.into_iter().enumerate() {
            let base = placed[idx].0;
            placed[idx].0 = spiral_offset(i, total, base);
        }
    }
}
