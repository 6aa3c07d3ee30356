//! `distance` - great-circle distance between two places

use super::print_json;
use crate::error::CliError;
use careatlas::analysis::calculate_distance;
use careatlas::resolver::LocationResolver;

#[derive(Debug, clap::Args)]
pub struct DistanceArgs {
    /// Starting location: city name, landmark, or "lat,lon"
    #[arg(long)]
    pub from: String,

    /// Destination location: city name, landmark, or "lat,lon"
    #[arg(long)]
    pub to: String,
}

pub fn run(args: &DistanceArgs) -> Result<(), CliError> {
    let resolver = LocationResolver::default();
    let result = calculate_distance(&resolver, &args.from, &args.to)?;
    print_json(&result);
    Ok(())
}
