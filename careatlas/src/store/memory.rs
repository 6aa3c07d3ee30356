//! In-memory facility store
//!
//! Holds a loaded facility list and answers searches with the same
//! broad-recall substring semantics a SQL backend would implement with
//! `LIKE '%…%'` filters.

use super::types::Facility;
use super::{FacilityStore, StoreError};

/// A facility store over an owned list of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    facilities: Vec<Facility>,
}

impl InMemoryStore {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// Load facilities from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let facilities: Vec<Facility> =
            serde_json::from_str(json).map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        Ok(Self::new(facilities))
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl FacilityStore for InMemoryStore {
    fn search(
        &self,
        condition: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<Facility>, StoreError> {
        let region_needle = region.map(|r| r.trim().to_lowercase()).filter(|r| !r.is_empty());

        Ok(self
            .facilities
            .iter()
            .filter(|f| match condition {
                Some(cond) => f.matches_condition(cond),
                None => true,
            })
            .filter(|f| match &region_needle {
                Some(needle) => f.region.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect())
    }
}
