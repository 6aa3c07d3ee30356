//! Radius-bounded facility search

use super::locate::resolve_facility_point;
use super::{round2, AnalysisError, PlaceRef};
use crate::gazetteer::Gazetteer;
use crate::geo::{haversine_km, Point};
use crate::resolver::LocationResolver;
use crate::store::FacilityStore;
use serde::Serialize;
use tracing::debug;

/// Parameters for a proximity search.
#[derive(Debug, Clone)]
pub struct ProximityParams {
    /// City name, landmark, or "lat,lon".
    pub location: String,
    /// Search radius in kilometers.
    pub radius_km: f64,
    /// Optional specialty/procedure filter (substring, broad recall).
    pub condition: Option<String>,
    /// Maximum facilities returned.
    pub limit: usize,
}

impl ProximityParams {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            radius_km: 50.0,
            condition: None,
            limit: 20,
        }
    }
}

/// A facility within the search radius.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyFacility {
    pub id: String,
    pub name: String,
    pub city: String,
    pub region: String,
    pub facility_type: String,
    pub distance_km: f64,
    pub lat: f64,
    pub lng: f64,
    pub specialties: Vec<String>,
    pub procedures: Vec<String>,
    pub equipment: Vec<String>,
    pub capabilities: Vec<String>,
    pub description: String,
}

/// Result of a proximity search.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityResult {
    pub center: PlaceRef,
    pub radius_km: f64,
    pub condition_filter: Option<String>,
    /// Facilities within the radius, nearest first, truncated to `limit`.
    pub facilities: Vec<NearbyFacility>,
    /// Count of matches before truncation.
    pub total_found: usize,
    pub summary: String,
}

/// "Facilities within radius of X" over a facility store.
pub struct ProximitySearch<'a, S: FacilityStore> {
    store: &'a S,
    resolver: LocationResolver,
}

impl<'a, S: FacilityStore> ProximitySearch<'a, S> {
    pub fn new(store: &'a S, resolver: LocationResolver) -> Self {
        Self { store, resolver }
    }

    /// Run the search.
    ///
    /// # Errors
    ///
    /// Fails on an unresolvable center location or a store read failure.
    /// Facilities whose own coordinates cannot be resolved are silently
    /// dropped from the result set.
    pub fn run(&self, params: &ProximityParams) -> Result<ProximityResult, AnalysisError> {
        let center = self.resolver.resolve(&params.location)?.point;
        let gazetteer = self.resolver.gazetteer();

        let rows = self.store.search(params.condition.as_deref(), None)?;
        debug!(
            location = %params.location,
            candidates = rows.len(),
            "proximity search retrieved candidates"
        );

        let mut facilities: Vec<NearbyFacility> = Vec::new();
        let mut dropped = 0usize;
        for row in rows {
            let Some(point) = resolve_facility_point(&row, gazetteer) else {
                dropped += 1;
                continue;
            };

            let distance = haversine_km(center, point);
            if params.radius_km > 0.0 && distance <= params.radius_km {
                facilities.push(NearbyFacility {
                    id: row.id,
                    name: row.name,
                    city: row.city,
                    region: row.region,
                    facility_type: row.facility_type,
                    distance_km: round2(distance),
                    lat: point.lat,
                    lng: point.lon,
                    specialties: row.specialties,
                    procedures: row.procedures,
                    equipment: row.equipment,
                    capabilities: row.capabilities,
                    description: row.description,
                });
            }
        }
        if dropped > 0 {
            debug!(dropped = dropped, "facilities without resolvable coordinates skipped");
        }

        // Stable: ties keep retrieval order
        facilities.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        let total_found = facilities.len();
        facilities.truncate(params.limit);

        let summary = build_summary(params, total_found, facilities.first());

        Ok(ProximityResult {
            center: PlaceRef {
                location: params.location.clone(),
                lat: center.lat,
                lng: center.lon,
            },
            radius_km: params.radius_km,
            condition_filter: params.condition.clone(),
            facilities,
            total_found,
            summary,
        })
    }
}

fn build_summary(
    params: &ProximityParams,
    total_found: usize,
    closest: Option<&NearbyFacility>,
) -> String {
    let condition_text = params
        .condition
        .as_deref()
        .map(|c| format!(" treating {}", c))
        .unwrap_or_default();
    let mut summary = format!(
        "Found {} facilities{} within {} km of {}.",
        total_found, condition_text, params.radius_km, params.location
    );
    if let Some(closest) = closest {
        summary.push_str(&format!(
            " Closest: {} in {} ({} km away).",
            closest.name, closest.city, closest.distance_km
        ));
    }
    summary
}
