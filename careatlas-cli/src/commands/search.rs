//! `search` - facilities within a radius of a location

use super::{load_store, print_json};
use crate::error::CliError;
use careatlas::analysis::{ProximityParams, ProximitySearch};
use careatlas::config::Settings;
use careatlas::resolver::LocationResolver;

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Facilities JSON file
    #[arg(long)]
    pub facilities: String,

    /// Center location: city name, landmark, or "lat,lon"
    #[arg(long)]
    pub location: String,

    /// Search radius in kilometers (defaults to the configured radius)
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Filter by specialty/procedure (substring match)
    #[arg(long)]
    pub condition: Option<String>,

    /// Maximum facilities returned
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

pub fn run(args: &SearchArgs, settings: &Settings) -> Result<(), CliError> {
    let store = load_store(&args.facilities)?;
    let search = ProximitySearch::new(&store, LocationResolver::default());

    let result = search.run(&ProximityParams {
        location: args.location.clone(),
        radius_km: args.radius_km.unwrap_or(settings.default_radius_km),
        condition: args.condition.clone(),
        limit: args.limit,
    })?;

    print_json(&result);
    Ok(())
}
