//! External geocoding
//!
//! Resolves facility addresses to coordinates through an external
//! geocoding provider, offline during ingestion. The pieces:
//!
//! - [`CandidateBuilder`] — ranked geocoding query candidates per facility
//! - [`GeocodeProvider`] / [`AsyncGeocodeProvider`] — the provider seam
//! - [`run_cascade`] — the accept/fallback policy over a candidate list
//! - [`geocode_batch`] / [`geocode_batch_concurrent`] — batch drivers

mod candidates;
mod cascade;
mod google;
mod http;
mod ingest;
mod types;

pub use candidates::CandidateBuilder;
pub use cascade::{run_cascade, run_cascade_async, CascadeOutcome};
pub use google::{AsyncGoogleGeocoder, GoogleGeocoder, API_KEY_ENV};
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpClient, ReqwestClient};
pub use ingest::{geocode_batch, geocode_batch_concurrent, IngestSummary};
pub use types::{AsyncGeocodeProvider, GeocodeHit, GeocodeProvider, GeocoderError, PrecisionTier};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, MockHttpClient};
