//! Cascading geocode acceptance policy
//!
//! Runs a facility's candidate queries against a provider in order:
//!
//! - A precise-tier result is accepted immediately; later candidates are
//!   never tried.
//! - The first approximate result is remembered as a fallback; later
//!   approximate results never replace it.
//! - Provider failures (network, rate limits) count as "no result" for
//!   that candidate only; the cascade proceeds.
//! - An empty candidate list short-circuits to `Error` with zero
//!   provider calls.

use super::types::{AsyncGeocodeProvider, GeocodeHit, GeocodeProvider, PrecisionTier};
use crate::geo::Point;
use crate::store::GeocodeStatus;
use tracing::{debug, warn};

/// Terminal result of a cascade run.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// Accepted coordinate, if any.
    pub point: Option<Point>,
    /// Terminal status: `Precise`, `Approximate`, or `Error`.
    pub status: GeocodeStatus,
    /// The candidate query that produced the accepted result.
    pub accepted_query: Option<String>,
    /// Precision tier of the accepted result.
    pub tier: Option<PrecisionTier>,
}

impl CascadeOutcome {
    fn error() -> Self {
        Self {
            point: None,
            status: GeocodeStatus::Error,
            accepted_query: None,
            tier: None,
        }
    }

    fn accepted(hit: GeocodeHit, query: &str, status: GeocodeStatus) -> Self {
        Self {
            point: Some(hit.point),
            status,
            accepted_query: Some(query.to_string()),
            tier: Some(hit.tier),
        }
    }
}

/// One remembered approximate hit, first wins.
struct ApproxSlot {
    hit: GeocodeHit,
    query: String,
}

/// Run the cascade over a candidate list (blocking provider).
pub fn run_cascade<P: GeocodeProvider>(provider: &P, candidates: &[String]) -> CascadeOutcome {
    if candidates.is_empty() {
        return CascadeOutcome::error();
    }

    let mut approx: Option<ApproxSlot> = None;

    for query in candidates {
        let query = query.trim();
        if query.is_empty() {
            continue;
        }

        let hit = match provider.geocode(query) {
            Ok(Some(hit)) => hit,
            Ok(None) => continue,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    query = query,
                    error = %e,
                    "geocode call failed; trying next candidate"
                );
                continue;
            }
        };

        if hit.tier.is_precise() {
            debug!(query = query, tier = ?hit.tier, "precise result accepted");
            return CascadeOutcome::accepted(hit, query, GeocodeStatus::Precise);
        }

        if approx.is_none() {
            debug!(query = query, "approximate result remembered as fallback");
            approx = Some(ApproxSlot {
                hit,
                query: query.to_string(),
            });
        }
    }

    match approx {
        Some(slot) => CascadeOutcome::accepted(slot.hit, &slot.query, GeocodeStatus::Approximate),
        None => CascadeOutcome::error(),
    }
}

/// Run the cascade over a candidate list (async provider).
///
/// Calls are awaited strictly in candidate order; the short-circuit and
/// first-approximate-wins semantics depend on it.
pub async fn run_cascade_async<P: AsyncGeocodeProvider>(
    provider: &P,
    candidates: &[String],
) -> CascadeOutcome {
    if candidates.is_empty() {
        return CascadeOutcome::error();
    }

    let mut approx: Option<ApproxSlot> = None;

    for query in candidates {
        let query = query.trim();
        if query.is_empty() {
            continue;
        }

        let hit = match provider.geocode(query).await {
            Ok(Some(hit)) => hit,
            Ok(None) => continue,
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    query = query,
                    error = %e,
                    "geocode call failed; trying next candidate"
                );
                continue;
            }
        };

        if hit.tier.is_precise() {
            debug!(query = query, tier = ?hit.tier, "precise result accepted");
            return CascadeOutcome::accepted(hit, query, GeocodeStatus::Precise);
        }

        if approx.is_none() {
            approx = Some(ApproxSlot {
                hit,
                query: query.to_string(),
            });
        }
    }

    match approx {
        Some(slot) => CascadeOutcome::accepted(slot.hit, &slot.query, GeocodeStatus::Approximate),
        None => CascadeOutcome::error(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geocode::types::GeocoderError;
    use std::sync::Mutex;

    /// Scripted provider: one canned reply per query, with a call log.
    pub(crate) struct ScriptedProvider {
        pub replies: Vec<(&'static str, Result<Option<GeocodeHit>, GeocoderError>)>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub fn new(
            replies: Vec<(&'static str, Result<Option<GeocodeHit>, GeocoderError>)>,
        ) -> Self {
            Self {
                replies,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl GeocodeProvider for ScriptedProvider {
        fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocoderError> {
            self.calls.lock().unwrap().push(query.to_string());
            self.replies
                .iter()
                .find(|(q, _)| *q == query)
                .map(|(_, reply)| reply.clone())
                .unwrap_or(Ok(None))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    pub(crate) fn hit(lat: f64, lon: f64, tier: PrecisionTier) -> GeocodeHit {
        GeocodeHit {
            point: Point::new(lat, lon).unwrap(),
            tier,
        }
    }

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_precise_short_circuits() {
        // [approximate, precise, precise]: second accepted, third never queried
        let provider = ScriptedProvider::new(vec![
            ("q1", Ok(Some(hit(5.0, 0.0, PrecisionTier::Approximate)))),
            ("q2", Ok(Some(hit(6.0, 1.0, PrecisionTier::Rooftop)))),
            ("q3", Ok(Some(hit(7.0, 2.0, PrecisionTier::Rooftop)))),
        ]);

        let outcome = run_cascade(&provider, &queries(&["q1", "q2", "q3"]));
        assert_eq!(outcome.status, GeocodeStatus::Precise);
        assert_eq!(outcome.accepted_query.as_deref(), Some("q2"));
        assert!((outcome.point.unwrap().lat - 6.0).abs() < 1e-9);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["q1", "q2"]);
    }

    #[test]
    fn test_first_approximate_wins() {
        // [approximate, approximate]: first candidate's coordinates returned
        let provider = ScriptedProvider::new(vec![
            ("q1", Ok(Some(hit(5.0, 0.0, PrecisionTier::Approximate)))),
            ("q2", Ok(Some(hit(9.0, 9.0, PrecisionTier::Approximate)))),
        ]);

        let outcome = run_cascade(&provider, &queries(&["q1", "q2"]));
        assert_eq!(outcome.status, GeocodeStatus::Approximate);
        assert_eq!(outcome.accepted_query.as_deref(), Some("q1"));
        assert!((outcome.point.unwrap().lat - 5.0).abs() < 1e-9);
        // Both candidates were still tried in hope of a precise result
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_empty_candidate_list_is_error_without_calls() {
        let provider = ScriptedProvider::new(vec![]);
        let outcome = run_cascade(&provider, &[]);
        assert_eq!(outcome.status, GeocodeStatus::Error);
        assert_eq!(outcome.point, None);
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_all_misses_is_error() {
        let provider = ScriptedProvider::new(vec![("q1", Ok(None)), ("q2", Ok(None))]);
        let outcome = run_cascade(&provider, &queries(&["q1", "q2"]));
        assert_eq!(outcome.status, GeocodeStatus::Error);
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_provider_failure_skips_candidate_only() {
        // First call fails transiently; cascade continues and accepts q2
        let provider = ScriptedProvider::new(vec![
            ("q1", Err(GeocoderError::Http("rate limited".to_string()))),
            ("q2", Ok(Some(hit(6.0, 1.0, PrecisionTier::GeometricCenter)))),
        ]);

        let outcome = run_cascade(&provider, &queries(&["q1", "q2"]));
        assert_eq!(outcome.status, GeocodeStatus::Precise);
        assert_eq!(outcome.accepted_query.as_deref(), Some("q2"));
    }

    #[test]
    fn test_blank_candidates_skipped() {
        let provider = ScriptedProvider::new(vec![(
            "q1",
            Ok(Some(hit(6.0, 1.0, PrecisionTier::Rooftop))),
        )]);
        let outcome = run_cascade(&provider, &queries(&["", "  ", "q1"]));
        assert_eq!(outcome.status, GeocodeStatus::Precise);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_approximate_then_error_keeps_fallback() {
        let provider = ScriptedProvider::new(vec![
            ("q1", Ok(Some(hit(5.0, 0.0, PrecisionTier::Approximate)))),
            ("q2", Err(GeocoderError::Http("timeout".to_string()))),
        ]);
        let outcome = run_cascade(&provider, &queries(&["q1", "q2"]));
        assert_eq!(outcome.status, GeocodeStatus::Approximate);
        assert!((outcome.point.unwrap().lat - 5.0).abs() < 1e-9);
    }

    /// Async scripted provider mirroring [`ScriptedProvider`].
    struct AsyncScriptedProvider {
        inner: ScriptedProvider,
    }

    impl AsyncGeocodeProvider for AsyncScriptedProvider {
        async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocoderError> {
            self.inner.geocode(query)
        }

        fn name(&self) -> &str {
            "scripted-async"
        }
    }

    #[tokio::test]
    async fn test_async_cascade_matches_blocking_policy() {
        let provider = AsyncScriptedProvider {
            inner: ScriptedProvider::new(vec![
                ("q1", Ok(Some(hit(5.0, 0.0, PrecisionTier::Approximate)))),
                ("q2", Ok(Some(hit(6.0, 1.0, PrecisionTier::Rooftop)))),
                ("q3", Ok(Some(hit(7.0, 2.0, PrecisionTier::Rooftop)))),
            ]),
        };

        let outcome =
            run_cascade_async(&provider, &["q1".to_string(), "q2".to_string(), "q3".to_string()])
                .await;
        assert_eq!(outcome.status, GeocodeStatus::Precise);
        assert_eq!(outcome.accepted_query.as_deref(), Some("q2"));
        assert_eq!(provider.inner.call_count(), 2);
    }
}
