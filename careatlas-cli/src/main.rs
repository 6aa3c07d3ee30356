//! CareAtlas CLI - Command-line interface
//!
//! This binary exposes the CareAtlas analysis engine over a JSON
//! facilities file: proximity search, coverage-gap analysis, distance
//! queries, GeoJSON export, offline geocoding, and facility counts.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use careatlas::config::Settings;
use careatlas::logging::init_logging;
use error::CliError;

#[derive(Parser)]
#[command(name = "careatlas")]
#[command(version = careatlas::VERSION)]
#[command(about = "Geospatial analysis over health facility registries", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ~/.careatlas/config.ini)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Skip log file setup (log to stderr only via RUST_LOG)
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find facilities within a radius of a location
    Search(commands::search::SearchArgs),
    /// Find coverage gaps for a capability
    Gaps(commands::gaps::GapsArgs),
    /// Distance between two places
    Distance(commands::distance::DistanceArgs),
    /// Export facilities as GeoJSON
    Export(commands::export::ExportArgs),
    /// Geocode facility addresses offline via the external provider
    Geocode(commands::geocode::GeocodeArgs),
    /// Count facilities by condition and region
    Count(commands::count::CountArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        e.exit();
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(std::path::Path::new(path)),
        None => Settings::load(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;

    // Keep the guard alive for the whole run so buffered log lines are
    // flushed on exit
    let _logging_guard = if cli.no_log_file {
        None
    } else {
        Some(
            init_logging(&settings.log_dir, &settings.log_file)
                .map_err(|e| CliError::LoggingInit(e.to_string()))?,
        )
    };

    match &cli.command {
        Command::Search(args) => commands::search::run(args, &settings),
        Command::Gaps(args) => commands::gaps::run(args, &settings),
        Command::Distance(args) => commands::distance::run(args),
        Command::Export(args) => commands::export::run(args),
        Command::Geocode(args) => commands::geocode::run(args, &settings),
        Command::Count(args) => commands::count::run(args),
    }
}
