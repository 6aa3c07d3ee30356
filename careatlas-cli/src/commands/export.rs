//! `export` - facilities as a GeoJSON FeatureCollection

use super::{load_store, print_json};
use crate::error::CliError;
use careatlas::analysis::{ExportParams, GeocodeExporter};
use careatlas::gazetteer::Gazetteer;
use tracing::info;

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// Facilities JSON file
    #[arg(long)]
    pub facilities: String,

    /// Filter by region (substring match)
    #[arg(long)]
    pub region: Option<String>,

    /// Filter by facility type (substring match)
    #[arg(long)]
    pub facility_type: Option<String>,

    /// Spread co-located map markers on a spiral (display only)
    #[arg(long)]
    pub spread_markers: bool,

    /// Write the FeatureCollection to a file instead of stdout
    #[arg(long)]
    pub output: Option<String>,
}

pub fn run(args: &ExportArgs) -> Result<(), CliError> {
    let store = load_store(&args.facilities)?;
    let exporter = GeocodeExporter::new(&store, Gazetteer::new());

    let result = exporter.run(&ExportParams {
        region: args.region.clone(),
        facility_type: args.facility_type.clone(),
        spread_markers: args.spread_markers,
    })?;

    info!(
        geocoded = result.total_geocoded,
        skipped = result.total_skipped,
        "export complete"
    );

    match &args.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&result.geojson)
                .map_err(|e| CliError::Geocode(e.to_string()))?;
            std::fs::write(path, json).map_err(|error| CliError::FileWrite {
                path: path.clone(),
                error,
            })?;
            println!("{}", result.summary);
        }
        None => print_json(&result),
    }
    Ok(())
}
