//! Bulk offline geocoding
//!
//! Drives the candidate builder + cascade over a batch of facilities,
//! assigning each its terminal [`GeocodeStatus`]. Facilities that
//! already carry a terminal status are left untouched; the status
//! transition happens exactly once, here.

use super::candidates::CandidateBuilder;
use super::cascade::{run_cascade, run_cascade_async, CascadeOutcome};
use super::types::{AsyncGeocodeProvider, GeocodeProvider};
use crate::store::{Facility, GeocodeStatus};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// How often to emit a progress line.
const PROGRESS_INTERVAL: usize = 50;

/// Counters for a batch geocoding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Facilities examined.
    pub total: usize,
    /// Accepted with a precise-tier result.
    pub precise: usize,
    /// Kept an approximate fallback.
    pub approximate: usize,
    /// No candidate produced a usable result.
    pub errors: usize,
    /// Already carried a terminal status; not re-geocoded.
    pub skipped: usize,
}

impl IngestSummary {
    fn record(&mut self, status: GeocodeStatus) {
        match status {
            GeocodeStatus::Precise => self.precise += 1,
            GeocodeStatus::Approximate => self.approximate += 1,
            GeocodeStatus::Error => self.errors += 1,
            GeocodeStatus::Unresolved => {}
        }
    }

    fn processed(&self) -> usize {
        self.precise + self.approximate + self.errors
    }
}

fn apply_outcome(facility: &mut Facility, outcome: CascadeOutcome) {
    facility.coordinate = outcome.point;
    facility.geocode_status = outcome.status;
    if let Some(query) = &outcome.accepted_query {
        debug!(
            facility = %facility.id,
            query = %query,
            status = ?outcome.status,
            "geocode accepted"
        );
    }
}

/// Geocode a batch of facilities sequentially.
pub fn geocode_batch<P: GeocodeProvider>(
    facilities: &mut [Facility],
    provider: &P,
    builder: &CandidateBuilder,
) -> IngestSummary {
    let mut summary = IngestSummary {
        total: facilities.len(),
        ..IngestSummary::default()
    };

    for facility in facilities.iter_mut() {
        if facility.geocode_status.is_terminal() {
            summary.skipped += 1;
            continue;
        }

        let candidates = builder.build(facility);
        let outcome = run_cascade(provider, &candidates);
        summary.record(outcome.status);
        apply_outcome(facility, outcome);

        if summary.processed() % PROGRESS_INTERVAL == 0 {
            info!(
                processed = summary.processed(),
                total = summary.total,
                precise = summary.precise,
                approximate = summary.approximate,
                errors = summary.errors,
                "geocoding progress"
            );
        }
    }

    info!(
        total = summary.total,
        precise = summary.precise,
        approximate = summary.approximate,
        errors = summary.errors,
        skipped = summary.skipped,
        "geocoding complete"
    );

    summary
}

/// Geocode a batch of facilities with bounded concurrency.
///
/// Facilities are independent, so their cascades run concurrently up to
/// `concurrency` at a time; within each facility the cascade still
/// awaits provider calls strictly in candidate order.
pub async fn geocode_batch_concurrent<P: AsyncGeocodeProvider>(
    facilities: &mut [Facility],
    provider: &P,
    builder: &CandidateBuilder,
    concurrency: usize,
) -> IngestSummary {
    let mut summary = IngestSummary {
        total: facilities.len(),
        ..IngestSummary::default()
    };

    let mut pending: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, facility) in facilities.iter().enumerate() {
        if facility.geocode_status.is_terminal() {
            summary.skipped += 1;
        } else {
            pending.push((idx, builder.build(facility)));
        }
    }

    let mut results = stream::iter(pending)
        .map(|(idx, candidates)| async move {
            let outcome = run_cascade_async(provider, &candidates).await;
            (idx, outcome)
        })
        .buffer_unordered(concurrency.max(1));

    while let Some((idx, outcome)) = results.next().await {
        summary.record(outcome.status);
        apply_outcome(&mut facilities[idx], outcome);

        if summary.processed() % PROGRESS_INTERVAL == 0 {
            info!(
                processed = summary.processed(),
                total = summary.total,
                precise = summary.precise,
                approximate = summary.approximate,
                errors = summary.errors,
                "geocoding progress"
            );
        }
    }

    info!(
        total = summary.total,
        precise = summary.precise,
        approximate = summary.approximate,
        errors = summary.errors,
        skipped = summary.skipped,
        "geocoding complete"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::cascade::tests::{hit, ScriptedProvider};
    use crate::geocode::types::PrecisionTier;
    use crate::geo::Point;

    fn facility(id: &str, name: &str, city: &str) -> Facility {
        Facility {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            region: String::new(),
            address_line1: String::new(),
            facility_type: String::new(),
            specialties: vec![],
            procedures: vec![],
            equipment: vec![],
            capabilities: vec![],
            description: String::new(),
            phone: String::new(),
            coordinate: None,
            geocode_status: GeocodeStatus::Unresolved,
        }
    }

    #[test]
    fn test_batch_assigns_terminal_statuses() {
        let mut facilities = vec![
            facility("a", "Ridge Hospital", "Accra"),
            facility("b", "Unknown Clinic", ""),
        ];
        let provider = ScriptedProvider::new(vec![(
            "Ridge Hospital",
            Ok(Some(hit(5.565, -0.2, PrecisionTier::Rooftop))),
        )]);
        let builder = CandidateBuilder::new("Ghana");

        let summary = geocode_batch(&mut facilities, &provider, &builder);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.precise, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(facilities[0].geocode_status, GeocodeStatus::Precise);
        assert!(facilities[0].coordinate.is_some());
        assert_eq!(facilities[1].geocode_status, GeocodeStatus::Error);
        assert!(facilities[1].coordinate.is_none());
    }

    #[test]
    fn test_terminal_facilities_are_not_regeocode() {
        let mut f = facility("a", "Ridge Hospital", "Accra");
        f.geocode_status = GeocodeStatus::Approximate;
        f.coordinate = Some(Point::new(5.6, -0.19).unwrap());
        let mut facilities = vec![f];

        let provider = ScriptedProvider::new(vec![(
            "Ridge Hospital",
            Ok(Some(hit(5.565, -0.2, PrecisionTier::Rooftop))),
        )]);
        let builder = CandidateBuilder::new("Ghana");

        let summary = geocode_batch(&mut facilities, &provider, &builder);

        assert_eq!(summary.skipped, 1);
        assert_eq!(provider.call_count(), 0);
        // Status and coordinate untouched
        assert_eq!(facilities[0].geocode_status, GeocodeStatus::Approximate);
        assert!((facilities[0].coordinate.unwrap().lat - 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_facility_with_no_text_fields_is_error_without_calls() {
        let mut facilities = vec![facility("a", "", "")];
        let provider = ScriptedProvider::new(vec![]);
        let builder = CandidateBuilder::new("Ghana");

        let summary = geocode_batch(&mut facilities, &provider, &builder);

        assert_eq!(summary.errors, 1);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(facilities[0].geocode_status, GeocodeStatus::Error);
    }

    struct AsyncScripted(ScriptedProvider);

    impl AsyncGeocodeProvider for AsyncScripted {
        async fn geocode(
            &self,
            query: &str,
        ) -> Result<Option<crate::geocode::GeocodeHit>, crate::geocode::GeocoderError> {
            self.0.geocode(query)
        }

        fn name(&self) -> &str {
            "scripted-async"
        }
    }

    #[tokio::test]
    async fn test_concurrent_batch_matches_sequential_outcomes() {
        let mut facilities = vec![
            facility("a", "Ridge Hospital", "Accra"),
            facility("b", "Holy Family Hospital", "Techiman"),
            facility("c", "Unknown Clinic", ""),
        ];
        let provider = AsyncScripted(ScriptedProvider::new(vec![
            (
                "Ridge Hospital",
                Ok(Some(hit(5.565, -0.2, PrecisionTier::Rooftop))),
            ),
            (
                "Holy Family Hospital, Techiman, Ghana",
                Ok(Some(hit(7.58, -1.94, PrecisionTier::Approximate))),
            ),
        ]));
        let builder = CandidateBuilder::new("Ghana");

        let summary =
            geocode_batch_concurrent(&mut facilities, &provider, &builder, 4).await;

        assert_eq!(summary.precise, 1);
        assert_eq!(summary.approximate, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(facilities[0].geocode_status, GeocodeStatus::Precise);
        assert_eq!(facilities[1].geocode_status, GeocodeStatus::Approximate);
        assert_eq!(facilities[2].geocode_status, GeocodeStatus::Error);
    }
}
