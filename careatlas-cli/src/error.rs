//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use careatlas::analysis::AnalysisError;
use careatlas::resolver::ResolutionError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to read the facilities file
    FacilitiesFile { path: String, error: String },
    /// A location string could not be resolved
    Resolution(ResolutionError),
    /// The facility store query failed
    Query(String),
    /// Geocoding setup or execution failed
    Geocode(String),
    /// Failed to write an output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Geocode(_) => {
                eprintln!();
                eprintln!("If using the Google geocoder, make sure:");
                eprintln!("  1. GOOGLE_MAPS_API_KEY is exported (or set in ~/.careatlas/config.ini)");
                eprintln!("  2. The Geocoding API is enabled for your key");
            }
            CliError::FacilitiesFile { .. } => {
                eprintln!();
                eprintln!("The facilities file must be a JSON array of facility records.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::FacilitiesFile { path, error } => {
                write!(f, "Failed to load facilities from '{}': {}", path, error)
            }
            CliError::Resolution(e) => write!(f, "{}", e),
            CliError::Query(msg) => write!(f, "{}", msg),
            CliError::Geocode(msg) => write!(f, "Geocoding failed: {}", msg),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Resolution(e) => CliError::Resolution(e),
            AnalysisError::Store(e) => CliError::Query(e.to_string()),
        }
    }
}

impl From<ResolutionError> for CliError {
    fn from(e: ResolutionError) -> Self {
        CliError::Resolution(e)
    }
}
