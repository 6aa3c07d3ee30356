//! CareAtlas - Geospatial analysis for health facility registries
//!
//! This library answers proximity and coverage questions over a set of
//! geotagged facility records: what is near a location, where are the
//! coverage gaps for a capability, and how far apart two places are. It
//! also resolves free-text place names and facility addresses into
//! coordinates, including an offline, fault-tolerant cascade against an
//! external geocoding provider.
//!
//! # High-Level API
//!
//! ```no_run
//! use careatlas::analysis::{ProximityParams, ProximitySearch};
//! use careatlas::resolver::LocationResolver;
//! use careatlas::store::InMemoryStore;
//!
//! let store = InMemoryStore::from_json(r#"[]"#)?;
//! let search = ProximitySearch::new(&store, LocationResolver::default());
//! let result = search.run(&ProximityParams::new("Accra"))?;
//! println!("{}", result.summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod config;
pub mod gazetteer;
pub mod geo;
pub mod geocode;
pub mod logging;
pub mod resolver;
pub mod store;

/// Version of the CareAtlas library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
