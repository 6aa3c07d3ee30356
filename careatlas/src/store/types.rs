//! Facility record types

use crate::geo::Point;
use serde::{Deserialize, Serialize};

/// Terminal outcome of offline geocoding for a facility.
///
/// Transitions exactly once, during ingestion, from `Unresolved` to one
/// of the terminal values. Query-time gazetteer fallback never mutates
/// this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeStatus {
    /// Not yet geocoded (initial state).
    #[default]
    Unresolved,
    /// A precise-tier result was accepted.
    Precise,
    /// Only an approximate result was available.
    Approximate,
    /// All candidates failed, or the candidate list was unusable.
    Error,
}

impl GeocodeStatus {
    pub fn is_terminal(self) -> bool {
        self != GeocodeStatus::Unresolved
    }
}

/// A geotagged facility record as returned by the facility store.
///
/// Tag fields (specialties, procedures, equipment, capabilities) are
/// free-text lists; upstream exports sometimes flatten them into single
/// strings, which [`parse_list_field`] normalizes back into lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub facility_type: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: String,
    /// Coordinate persisted by the offline geocoding step, if any.
    #[serde(default)]
    pub coordinate: Option<Point>,
    #[serde(default)]
    pub geocode_status: GeocodeStatus,
}

impl Facility {
    /// All free-text tag fields, for substring condition matching.
    pub fn tag_fields(&self) -> impl Iterator<Item = &str> {
        self.specialties
            .iter()
            .chain(&self.procedures)
            .chain(&self.equipment)
            .chain(&self.capabilities)
            .map(String::as_str)
            .chain(std::iter::once(self.description.as_str()))
    }

    /// Case-insensitive substring match across all tag fields.
    ///
    /// Broad recall on purpose; this is a filter, not a classifier.
    pub fn matches_condition(&self, condition: &str) -> bool {
        let needle = condition.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.tag_fields()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Normalize a flattened list field into a list of strings.
///
/// Upstream CSV exports store list columns either as JSON arrays or as
/// Python-repr strings with single quotes (`"['a', 'b']"`). Tries JSON
/// first, then the single-quote form; anything else non-empty becomes a
/// one-element list.
pub fn parse_list_field(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.is_empty() || s == "[]" || s == "None" || s == "null" || s == "nan" {
        return Vec::new();
    }

    if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(s) {
        return items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(item) => {
                    let item = item.trim().to_string();
                    (!item.is_empty()).then_some(item)
                }
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect();
    }

    // Python-repr form: swap quote style and retry as JSON
    if s.starts_with('[') && s.ends_with(']') && s.contains('\'') && !s.contains('"') {
        let swapped = s.replace('\'', "\"");
        if let Ok(serde_json::Value::Array(items)) =
            serde_json::from_str::<serde_json::Value>(&swapped)
        {
            return items
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(item) => {
                        let item = item.trim().to_string();
                        (!item.is_empty()).then_some(item)
                    }
                    _ => None,
                })
                .collect();
        }
    }

    vec![s.to_string()]
}
