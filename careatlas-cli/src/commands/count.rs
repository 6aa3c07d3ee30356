//! `count` - facility totals and regional breakdown

use super::{load_store, print_json};
use crate::error::CliError;
use careatlas::analysis::{CensusParams, FacilityCensus};

#[derive(Debug, clap::Args)]
pub struct CountArgs {
    /// Facilities JSON file
    #[arg(long)]
    pub facilities: String,

    /// Filter by specialty/procedure (substring match)
    #[arg(long)]
    pub condition: Option<String>,

    /// Filter by region (substring match)
    #[arg(long)]
    pub region: Option<String>,
}

pub fn run(args: &CountArgs) -> Result<(), CliError> {
    let store = load_store(&args.facilities)?;
    let census = FacilityCensus::new(&store);

    let result = census.run(&CensusParams {
        condition: args.condition.clone(),
        region: args.region.clone(),
    })?;

    print_json(&result);
    Ok(())
}
