//! Command-line interface for the Locus location store.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use locus_core::{AddressId, MapLocation, StopId};
use locus_data::LocationStore;
use locus_data::store::DEFAULT_DATABASE;

mod error;
mod import;

pub use error::CliError;

use import::{ImportArgs, run_import};

const ARG_ADDRESSES: &str = "addresses";
const ARG_STOPS: &str = "stops";
const ARG_DELIMITER: &str = "delimiter";
const ENV_ADDRESSES: &str = "LOCUS_CMDS_IMPORT_ADDRESSES";
const ENV_STOPS: &str = "LOCUS_CMDS_IMPORT_STOPS";

/// Run the Locus CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    execute(cli, &mut stdout)
}

/// Render `err` and its chain of causes, one cause per line.
#[must_use]
pub fn error_report(err: &CliError) -> String {
    let mut report = format!("locus: {err}");
    let mut cause = std::error::Error::source(err);
    while let Some(inner) = cause {
        report.push_str(&format!("\n  caused by: {inner}"));
        cause = std::error::Error::source(inner);
    }
    report
}

fn execute(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut store = open_store(&cli.database)?;
    match cli.command {
        Command::Init => {}
        Command::Import(args) => run_import(&mut store, args, writer)?,
        Command::AddAddress(location) => {
            let id = store.add_address(&location.to_location())?;
            write_line(writer, &id.to_string())?;
        }
        Command::AddStop(location) => {
            let id = store.add_stop(&location.to_location())?;
            write_line(writer, &id.to_string())?;
        }
        Command::AddRoute(route) => {
            let id = store.add_route(
                AddressId::new(route.address),
                StopId::new(route.stop),
                route.distance,
                route.time,
            )?;
            write_line(writer, &id.to_string())?;
        }
        Command::Unrouted => {
            let location = store.address_without_route()?;
            let payload =
                serde_json::to_string(&location).map_err(CliError::SerialiseLocation)?;
            write_line(writer, &payload)?;
        }
    }
    store.close()?;
    Ok(())
}

fn open_store(path: &Utf8Path) -> Result<LocationStore, CliError> {
    let mut store = LocationStore::open(path)?;
    store
        .initialise()
        .map_err(|source| CliError::Initialise {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(store)
}

fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

#[derive(Debug, Parser)]
#[command(
    name = "locus",
    about = "Manage addresses, stops and routes in a SQLite location store",
    version
)]
struct Cli {
    /// Path to the SQLite database.
    #[arg(long, global = true, value_name = "path", default_value = DEFAULT_DATABASE)]
    database: Utf8PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the location tables if they are missing.
    Init,
    /// Bulk-load addresses and stops from delimited files.
    Import(ImportArgs),
    /// Insert one address and print its id.
    AddAddress(LocationArgs),
    /// Insert one stop and print its id.
    AddStop(LocationArgs),
    /// Insert one route and print its id.
    AddRoute(RouteArgs),
    /// Print the first address without a route as JSON.
    Unrouted,
}

#[derive(Debug, Clone, Copy, Args)]
struct LocationArgs {
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,
    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
}

impl LocationArgs {
    const fn to_location(self) -> MapLocation {
        MapLocation::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Args)]
struct RouteArgs {
    /// Id of the address the route starts from.
    #[arg(long)]
    address: i64,
    /// Id of the stop the route leads to.
    #[arg(long)]
    stop: i64,
    /// Route distance.
    #[arg(long)]
    distance: i64,
    /// Route travel time.
    #[arg(long)]
    time: i64,
}

#[cfg(test)]
mod tests;
