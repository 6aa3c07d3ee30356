//! Facility counting and regional breakdown
//!
//! Aggregate counts without any geospatial filtering; answers "how many
//! facilities offer X" questions. Aggregation happens here rather than
//! in the store so the store trait stays dialect-free.

use super::AnalysisError;
use crate::store::FacilityStore;
use serde::Serialize;
use std::collections::HashMap;

/// How many sample facilities to include in the result.
const SAMPLE_SIZE: usize = 5;

/// Parameters for a facility census.
#[derive(Debug, Clone, Default)]
pub struct CensusParams {
    /// Optional specialty/procedure filter (substring, broad recall).
    pub condition: Option<String>,
    /// Optional region filter (substring).
    pub region: Option<String>,
}

/// A per-region facility count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// A sample facility row.
#[derive(Debug, Clone, Serialize)]
pub struct SampleFacility {
    pub name: String,
    pub city: String,
    pub region: String,
    pub specialties: Vec<String>,
}

/// Result of a facility census.
#[derive(Debug, Clone, Serialize)]
pub struct CensusResult {
    pub total_count: usize,
    pub condition_filter: Option<String>,
    pub region_filter: Option<String>,
    /// Counts per region, highest first.
    pub breakdown_by_region: Vec<RegionCount>,
    pub sample_facilities: Vec<SampleFacility>,
    pub summary: String,
}

/// Aggregate facility counting over a store.
pub struct FacilityCensus<'a, S: FacilityStore> {
    store: &'a S,
}

impl<'a, S: FacilityStore> FacilityCensus<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Run the census.
    pub fn run(&self, params: &CensusParams) -> Result<CensusResult, AnalysisError> {
        let rows = self
            .store
            .search(params.condition.as_deref(), params.region.as_deref())?;

        let total_count = rows.len();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for row in &rows {
            let region = if row.region.trim().is_empty() {
                "Unknown".to_string()
            } else {
                row.region.clone()
            };
            *counts.entry(region).or_insert(0) += 1;
        }
        let mut breakdown_by_region: Vec<RegionCount> = counts
            .into_iter()
            .map(|(region, count)| RegionCount { region, count })
            .collect();
        // Highest count first; name as tie-break for stable output
        breakdown_by_region
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));

        let sample_facilities = rows
            .iter()
            .take(SAMPLE_SIZE)
            .map(|row| SampleFacility {
                name: row.name.clone(),
                city: row.city.clone(),
                region: row.region.clone(),
                specialties: row.specialties.clone(),
            })
            .collect();

        let condition_text = params
            .condition
            .as_deref()
            .map(|c| format!(" with {}", c))
            .unwrap_or_default();
        let region_text = params
            .region
            .as_deref()
            .map(|r| format!(" in {}", r))
            .unwrap_or_else(|| " across Ghana".to_string());
        let summary = format!(
            "Found {} facilities{}{}.",
            total_count, condition_text, region_text
        );

        Ok(CensusResult {
            total_count,
            condition_filter: params.condition.clone(),
            region_filter: params.region.clone(),
            breakdown_by_region,
            sample_facilities,
            summary,
        })
    }
}
