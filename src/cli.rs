//! CLI interface.
//!
//! Each subcommand takes an itinerary file and is non-interactive:
//! arguments in, a list view, report, or GeoJSON out.
//!
//! - `itinerary schedule <file>`: the derived schedule, as text or `--json`.
//! - `itinerary check <file>`: validate and report suspicious timings.
//! - `itinerary map <file>`: map primitives as a GeoJSON feature collection.

mod format;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::clock::ClockTime;
use crate::config::Config;
use crate::loader;
use crate::map::{GeoJsonBackend, LatLng, MapView, leg_endpoints, walking_minutes};
use crate::model::{Entry, Itinerary, TransportMode};
use crate::schedule::{BackwardReset, backward_resets, derive_schedule_from};

use format::{ScheduleOutput, format_schedule};

/// Itinerary: plan a day, see it on a map.
#[derive(Debug, Parser)]
#[command(name = "itinerary", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file to use instead of `~/.itinerary/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow:
  1. itinerary check data/boston.json
  2. itinerary schedule data/boston.json
  3. itinerary map data/boston.json --select 11 --out boston.geojson

Logging goes to stderr; set RUST_LOG=debug for detail."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the derived schedule: every entry with its start time.
    ///
    /// Fixed times are shown verbatim and marked with `*`.
    Schedule {
        /// Itinerary file (`.json` or `.toml`).
        file: PathBuf,

        /// Print JSON instead of the list view.
        #[arg(long)]
        json: bool,

        /// Start the day at this time (e.g. "7:30 AM") instead of the configured one.
        #[arg(long)]
        day_start: Option<ClockTime>,
    },

    /// Validate an itinerary and report suspicious timings.
    ///
    /// Fails on malformed fixed times, negative durations, and duplicate ids.
    /// Fixed times that move the clock backward and walks shorter than the
    /// straight-line estimate are reported but don't fail.
    Check {
        /// Itinerary file (`.json` or `.toml`).
        file: PathBuf,
    },

    /// Render the itinerary as GeoJSON.
    ///
    /// Markers for places, lines for travel legs, and a popup for the
    /// selected entry. Written to `--out` (if given) or stdout.
    Map {
        /// Itinerary file (`.json` or `.toml`).
        file: PathBuf,

        /// Entry id to highlight.
        #[arg(long)]
        select: Option<String>,

        /// Write the GeoJSON to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Run the CLI.
///
/// # Errors
///
/// Returns a message naming the step that failed: loading config or the
/// itinerary, deriving the schedule, or writing output.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| e.to_string())?;

    match cli.command {
        Command::Schedule {
            file,
            json,
            day_start,
        } => cmd_schedule(&config, &file, json, day_start),
        Command::Check { file } => cmd_check(&config, &file),
        Command::Map { file, select, out } => {
            cmd_map(&config, &file, select.as_deref(), out.as_deref())
        }
    }
}

fn load(file: &Path) -> Result<Itinerary, String> {
    loader::load(file).map_err(|e| format!("failed to load {}: {e}", file.display()))
}

fn cmd_schedule(
    config: &Config,
    file: &Path,
    json: bool,
    day_start: Option<ClockTime>,
) -> Result<(), String> {
    let itinerary = load(file)?;
    let day_start = day_start.unwrap_or(config.day_start);
    log::info!("deriving schedule from {day_start}");

    let schedule = derive_schedule_from(&itinerary.entries, day_start)
        .map_err(|e| format!("failed to derive schedule: {e}"))?;

    if json {
        let fingerprint = itinerary
            .fingerprint()
            .map_err(|e| format!("failed to fingerprint itinerary: {e}"))?;
        let output = ScheduleOutput::new(itinerary.title.as_deref(), fingerprint, &schedule);
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("failed to serialize schedule: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_schedule(itinerary.title.as_deref(), &schedule));
    }

    Ok(())
}

fn cmd_check(config: &Config, file: &Path) -> Result<(), String> {
    let itinerary = load(file)?;
    let resets = backward_resets(&itinerary.entries, config.day_start)
        .map_err(|e| format!("invalid itinerary: {e}"))?;
    let fingerprint = itinerary
        .fingerprint()
        .map_err(|e| format!("failed to fingerprint itinerary: {e}"))?;

    let entries = itinerary.entries.len();
    let places = itinerary.places().count();
    println!(
        "ok: {entries} entries ({places} places, {} travel legs)",
        entries - places
    );
    println!("fingerprint: {fingerprint}");

    let warnings: Vec<String> = backward_fixed_times(&resets)
        .into_iter()
        .chain(short_walks(&itinerary))
        .collect();
    for warning in &warnings {
        println!("warning: {warning}");
    }
    log::info!("{} warning(s)", warnings.len());

    Ok(())
}

fn cmd_map(
    config: &Config,
    file: &Path,
    select: Option<&str>,
    out: Option<&Path>,
) -> Result<(), String> {
    let itinerary = load(file)?;

    let mut view = MapView::new(GeoJsonBackend::new(), config.map.clone());
    view.render(&itinerary, select);
    let collection = view.into_backend().into_feature_collection();

    let json = serde_json::to_string_pretty(&collection)
        .map_err(|e| format!("failed to serialize map: {e}"))?;

    match out {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!(
                "Rendered {} features → {}",
                collection.features.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// One line per fixed time that moved the running clock backward.
fn backward_fixed_times(resets: &[BackwardReset<'_>]) -> Vec<String> {
    resets
        .iter()
        .map(|reset| {
            let next_day = if reset.past_midnight {
                ", next day"
            } else {
                ""
            };
            format!(
                "entry {}: fixed time {} is before the running clock ({}{next_day})",
                reset.entry.id(),
                reset.fixed,
                reset.running,
            )
        })
        .collect()
}

/// Walks given less time than the straight line between their places takes.
fn short_walks(itinerary: &Itinerary) -> Vec<String> {
    let entries = &itinerary.entries;
    let mut warnings = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let Entry::Travel(travel) = entry else {
            continue;
        };
        if travel.transport != TransportMode::Walk {
            continue;
        }
        let Some((a, b)) = leg_endpoints(entries, i) else {
            continue;
        };
        let estimate = walking_minutes(LatLng::from(&a.location), LatLng::from(&b.location));
        if estimate > travel.duration {
            warnings.push(format!(
                "entry {}: {} min allotted for a walk of about {estimate} min",
                travel.id, travel.duration
            ));
        }
    }
    warnings
}
