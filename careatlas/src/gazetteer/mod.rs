//! Static place-name gazetteer
//!
//! A curated, versioned name→coordinate table in three tiers of
//! decreasing specificity: landmarks, cities, regions. Lookup is
//! case-insensitive and runs an ordered list of independent strategies,
//! short-circuiting on the first hit:
//!
//! 1. exact landmark
//! 2. exact city
//! 3. substring landmark (either string contains the other)
//! 4. substring city
//! 5. exact, then substring, region
//!
//! Within a strategy, ties are broken by table order.

mod bounds;
mod data;

pub use bounds::{bounds_for_region, BoundingBox, COUNTRY_BOUNDS, REGION_BOUNDS};

use crate::geo::{haversine_km, Point};

/// Specificity tier of a gazetteer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Landmark,
    City,
    Region,
}

/// A successful gazetteer lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Point,
    pub tier: Tier,
    /// The table key that matched (lowercase).
    pub key: &'static str,
}

/// Name→coordinate lookup over the three static tiers.
///
/// The default instance serves the curated Ghana tables; tests may
/// substitute smaller tables via [`Gazetteer::with_tables`].
#[derive(Debug, Clone, Copy)]
pub struct Gazetteer {
    landmarks: &'static [(&'static str, Point)],
    cities: &'static [(&'static str, Point)],
    regions: &'static [(&'static str, Point)],
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new()
    }
}

impl Gazetteer {
    /// Gazetteer over the built-in Ghana tables.
    pub fn new() -> Self {
        Self {
            landmarks: data::LANDMARKS,
            cities: data::CITIES,
            regions: data::REGIONS,
        }
    }

    /// Gazetteer over caller-supplied tables (test hook).
    pub fn with_tables(
        landmarks: &'static [(&'static str, Point)],
        cities: &'static [(&'static str, Point)],
        regions: &'static [(&'static str, Point)],
    ) -> Self {
        Self {
            landmarks,
            cities,
            regions,
        }
    }

    /// Look up a place name, trying each tier strategy in order.
    ///
    /// Returns `None` for unknown names; the caller decides whether that
    /// is an error (user-supplied location) or a silent skip (batch
    /// facility resolution).
    pub fn lookup(&self, name: &str) -> Option<Hit> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        let strategies: [fn(&Self, &str) -> Option<Hit>; 5] = [
            Self::exact_landmark,
            Self::exact_city,
            Self::fuzzy_landmark,
            Self::fuzzy_city,
            Self::region,
        ];
        strategies.iter().find_map(|s| s(self, &key))
    }

    fn exact_landmark(&self, key: &str) -> Option<Hit> {
        exact(self.landmarks, key, Tier::Landmark)
    }

    fn exact_city(&self, key: &str) -> Option<Hit> {
        exact(self.cities, key, Tier::City)
    }

    fn fuzzy_landmark(&self, key: &str) -> Option<Hit> {
        fuzzy(self.landmarks, key, Tier::Landmark)
    }

    fn fuzzy_city(&self, key: &str) -> Option<Hit> {
        fuzzy(self.cities, key, Tier::City)
    }

    fn region(&self, key: &str) -> Option<Hit> {
        exact(self.regions, key, Tier::Region).or_else(|| fuzzy(self.regions, key, Tier::Region))
    }

    /// Nearest city-tier entry to a point, with its distance.
    ///
    /// Used to attach a readable label to coverage-gap cells.
    pub fn nearest_city(&self, point: Point) -> Option<(&'static str, f64)> {
        self.cities
            .iter()
            .map(|(name, p)| (*name, haversine_km(point, *p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// A short alphabetical sample of known city names, for error guidance.
    pub fn sample_cities(&self, n: usize) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.cities.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.truncate(n);
        names
    }
}

fn exact(table: &'static [(&'static str, Point)], key: &str, tier: Tier) -> Option<Hit> {
    table.iter().find(|(name, _)| *name == key).map(|(name, p)| Hit {
        point: *p,
        tier,
        key: *name,
    })
}

fn fuzzy(table: &'static [(&'static str, Point)], key: &str, tier: Tier) -> Option<Hit> {
    table
        .iter()
        .find(|(name, _)| name.contains(key) || key.contains(*name))
        .map(|(name, p)| Hit {
            point: *p,
            tier,
            key: *name,
        })
}

/// Capitalize each whitespace-separated word ("cape coast" → "Cape Coast").
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
