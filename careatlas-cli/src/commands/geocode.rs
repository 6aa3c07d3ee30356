//! `geocode` - offline cascading geocoding over a facilities file

use super::load_store;
use crate::error::CliError;
use careatlas::config::Settings;
use careatlas::geocode::{geocode_batch, CandidateBuilder, GoogleGeocoder, ReqwestClient};
use careatlas::store::{Facility, FacilityStore};

#[derive(Debug, clap::Args)]
pub struct GeocodeArgs {
    /// Facilities JSON file
    #[arg(long)]
    pub facilities: String,

    /// Where to write the geocoded facilities (defaults to overwriting
    /// the input file)
    #[arg(long)]
    pub output: Option<String>,
}

pub fn run(args: &GeocodeArgs, settings: &Settings) -> Result<(), CliError> {
    let store = load_store(&args.facilities)?;
    let mut facilities: Vec<Facility> = store
        .search(None, None)
        .map_err(|e| CliError::Query(e.to_string()))?;

    let api_key = settings
        .effective_api_key()
        .ok_or_else(|| CliError::Geocode("no API key configured".to_string()))?;
    let http_client = ReqwestClient::with_timeout(settings.geocode_timeout_secs)
        .map_err(|e| CliError::Geocode(e.to_string()))?;
    let provider = GoogleGeocoder::new(http_client, api_key);
    let builder = CandidateBuilder::new(settings.country.clone());

    let summary = geocode_batch(&mut facilities, &provider, &builder);

    let output_path = args.output.as_deref().unwrap_or(&args.facilities);
    let json = serde_json::to_string_pretty(&facilities)
        .map_err(|e| CliError::Geocode(e.to_string()))?;
    std::fs::write(output_path, json).map_err(|error| CliError::FileWrite {
        path: output_path.to_string(),
        error,
    })?;

    println!(
        "Geocoded {} facilities: {} precise, {} approximate, {} errors, {} skipped.",
        summary.total, summary.precise, summary.approximate, summary.errors, summary.skipped
    );
    Ok(())
}
