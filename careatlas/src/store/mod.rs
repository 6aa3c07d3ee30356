//! Facility store abstraction
//!
//! The engine treats facility persistence as an external collaborator
//! behind the [`FacilityStore`] trait: one `search` read per analysis
//! call, substring condition matching done store-side with broad recall.
//! Backends own their schema and dialect; [`InMemoryStore`] is the
//! reference implementation used by tests and the CLI.

mod memory;
mod types;

pub use memory::InMemoryStore;
pub use types::{parse_list_field, Facility, GeocodeStatus};

use thiserror::Error;

/// Store-level failures, distinct from location resolution errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing query could not be executed.
    #[error("facility query failed: {0}")]
    QueryFailed(String),
}

/// Read-only facility retrieval.
pub trait FacilityStore: Send + Sync {
    /// Fetch facilities, optionally narrowed by a free-text condition
    /// (substring match across tag fields) and/or a region name
    /// (substring match on the region field).
    fn search(
        &self,
        condition: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<Facility>, StoreError>;
}
