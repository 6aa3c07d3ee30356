//! CLI subcommand implementations

pub mod count;
pub mod distance;
pub mod export;
pub mod gaps;
pub mod geocode;
pub mod search;

use crate::error::CliError;
use careatlas::store::InMemoryStore;
use serde::Serialize;

/// Load a facilities JSON file into the in-memory store.
pub fn load_store(path: &str) -> Result<InMemoryStore, CliError> {
    let json = std::fs::read_to_string(path).map_err(|e| CliError::FacilitiesFile {
        path: path.to_string(),
        error: e.to_string(),
    })?;
    InMemoryStore::from_json(&json).map_err(|e| CliError::FacilitiesFile {
        path: path.to_string(),
        error: e.to_string(),
    })
}

/// Print a result record as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize result: {}", e),
    }
}
