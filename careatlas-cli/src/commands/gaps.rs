//! `gaps` - coverage-gap (medical desert) analysis

use super::{load_store, print_json};
use crate::error::CliError;
use careatlas::analysis::{CoverageGapAnalyzer, CoverageParams};
use careatlas::config::Settings;
use careatlas::gazetteer::Gazetteer;

#[derive(Debug, clap::Args)]
pub struct GapsArgs {
    /// Facilities JSON file
    #[arg(long)]
    pub facilities: String,

    /// Capability/specialty to analyze (substring match)
    #[arg(long)]
    pub specialty: String,

    /// Minimum nearest-facility distance for a gap, in kilometers
    #[arg(long, default_value = "50")]
    pub min_gap_km: f64,

    /// Constrain the analysis to a region
    #[arg(long)]
    pub region: Option<String>,

    /// Maximum gap cells returned
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

pub fn run(args: &GapsArgs, settings: &Settings) -> Result<(), CliError> {
    let store = load_store(&args.facilities)?;
    let analyzer =
        CoverageGapAnalyzer::new(&store, Gazetteer::new()).with_grid_step(settings.grid_step_deg);

    let result = analyzer.run(&CoverageParams {
        specialty: args.specialty.clone(),
        min_gap_km: args.min_gap_km,
        region: args.region.clone(),
        limit: args.limit,
    })?;

    print_json(&result);
    Ok(())
}
