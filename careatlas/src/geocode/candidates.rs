//! Geocoding query candidate construction
//!
//! Builds a ranked, de-duplicated list of query strings per facility.
//! Order encodes decreasing expected precision:
//!
//! 1. `{name}` — works when the provider knows the facility outright
//! 2. `{name}, {city}, {country}` — adds geographic context
//! 3. `{cleaned address}, {city}, {country}` — specific street address
//!
//! with `{city}, {country}` as a last resort when nothing else exists.
//! Address lines are cleaned of parenthetical asides and landmark-style
//! phrases ("Near …", "Opposite …") that degrade geocoding accuracy.

use crate::store::Facility;
use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern"));

static LANDMARK_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Near|Opposite|Behind|Close to|Adjacent to|Next to|Beside|In front of|Closest station is)\b[^,]*",
    )
    .expect("landmark phrase pattern")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Builds ranked geocoding query candidates for facilities.
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    country: String,
}

impl CandidateBuilder {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }

    /// Build the ordered, de-duplicated candidate list for a facility.
    ///
    /// Empty only when the facility has no usable text field at all.
    pub fn build(&self, facility: &Facility) -> Vec<String> {
        let name = facility.name.trim();
        let city = facility.city.trim();
        let addr = facility.address_line1.trim();

        let mut candidates: Vec<String> = Vec::new();
        let mut push_unique = |candidate: String| {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };

        if !name.is_empty() {
            push_unique(name.to_string());
        }
        if !name.is_empty() && !city.is_empty() {
            push_unique(format!("{}, {}, {}", name, city, self.country));
        }
        if !addr.is_empty() {
            let cleaned = clean_address(addr);
            if !cleaned.is_empty() {
                if !city.is_empty() {
                    push_unique(format!("{}, {}, {}", cleaned, city, self.country));
                } else {
                    push_unique(format!("{}, {}", cleaned, self.country));
                }
            }
        }

        if candidates.is_empty() && !city.is_empty() {
            candidates.push(format!("{}, {}", city, self.country));
        }

        candidates
    }
}

/// Strip noise from an address line.
///
/// Removes parenthetical text and landmark-relative phrases, collapses
/// whitespace, and trims dangling punctuation.
pub fn clean_address(raw: &str) -> String {
    let s = PARENTHETICAL.replace_all(raw, "");
    let s = LANDMARK_PHRASES.replace_all(&s, "");
    let s = WHITESPACE.replace_all(s.trim(), " ");
    s.trim_matches([' ', '.', ',', ';', ':']).to_string()
}
