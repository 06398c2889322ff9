use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::info;

use crate::models::{EventKind, ExtractionResult, Match};
use crate::parsers::parse_log_file;
use crate::utils::{discover_log_files, format_duration, format_log_time};

#[derive(Parser)]
#[command(name = "blops-log-extractor")]
#[command(version = "0.1.0")]
#[command(about = "Extract matches and events from game server logs", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse logs and print the extracted matches as JSON
    Parse {
        /// Log files, or directories to search for *.log files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        skip: SkipArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show a summary of the matches in a log file
    Stats {
        /// Log file to summarize
        path: PathBuf,

        #[command(flatten)]
        skip: SkipArgs,
    },
}

#[derive(Args)]
pub struct SkipArgs {
    /// Only extract events of matches that began at or after this epoch timestamp
    #[arg(long, env = "BLOPS_SKIP_TO")]
    pub skip_to: Option<i64>,

    /// Continue from a previous `parse` output, using each file's lastLogTime
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

impl SkipArgs {
    fn thresholds(&self) -> Result<SkipThresholds> {
        let fallback = self.skip_to.unwrap_or(0);
        match &self.resume {
            Some(path) => read_resume_thresholds(path, fallback),
            None => Ok(SkipThresholds { default: fallback, per_file: BTreeMap::new() }),
        }
    }
}

/// Skip threshold to use for each log file
#[derive(Debug, PartialEq, Eq)]
struct SkipThresholds {
    default: i64,
    /// Thresholds from a per-file resume output, keyed the way `parse` prints paths
    per_file: BTreeMap<String, i64>,
}

impl SkipThresholds {
    fn for_file(&self, path: &Path) -> i64 {
        self.per_file.get(&path.display().to_string()).copied().unwrap_or(self.default)
    }
}

#[derive(Deserialize)]
struct ResumeState {
    #[serde(rename = "lastLogTime")]
    last_log_time: i64,
}

/// A previous `parse` output: a single result or results keyed by file
#[derive(Deserialize)]
#[serde(untagged)]
enum PreviousOutput {
    Single(ResumeState),
    PerFile(BTreeMap<String, ResumeState>),
}

/// Read a previous output's lastLogTime values
///
/// A single result applies to every file. Per-file results apply to the file
/// they were produced from; other files fall back to `fallback`.
fn read_resume_thresholds(path: &Path, fallback: i64) -> Result<SkipThresholds> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resume file: {}", path.display()))?;
    let previous: PreviousOutput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse resume file: {}", path.display()))?;

    let thresholds = match previous {
        PreviousOutput::Single(state) => {
            SkipThresholds { default: state.last_log_time, per_file: BTreeMap::new() }
        }
        PreviousOutput::PerFile(states) => SkipThresholds {
            default: fallback,
            per_file: states.into_iter().map(|(file, s)| (file, s.last_log_time)).collect(),
        },
    };

    info!(
        default = thresholds.default,
        files = thresholds.per_file.len(),
        path = %path.display(),
        "Resuming extraction"
    );
    Ok(thresholds)
}

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Parse { paths, skip, pretty, output }) => {
            run_parse(paths, &skip.thresholds()?, *pretty, output.as_deref())?;
        }
        Some(Commands::Stats { path, skip }) => {
            show_stats(path, skip.thresholds()?.for_file(path))?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn run_parse(
    paths: &[PathBuf],
    thresholds: &SkipThresholds,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let files = discover_log_files(paths)?;
    if files.is_empty() {
        bail!("No log files found");
    }

    let json = if let [file] = files.as_slice() {
        let result = parse_log_file(file, thresholds.for_file(file))?;
        to_json(&result, pretty)?
    } else {
        let results = files
            .par_iter()
            .map(|file| {
                parse_log_file(file, thresholds.for_file(file))
                    .map(|r| (file.display().to_string(), r))
            })
            .collect::<Result<BTreeMap<String, ExtractionResult>>>()?;
        to_json(&results, pretty)?
    };

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), files = files.len(), "Wrote extraction output");
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    json.context("Failed to serialize extraction result")
}

/// Per-type event totals for one match
#[derive(Debug, Default, PartialEq, Eq)]
struct EventCounts {
    kills: usize,
    deaths: usize,
    joins: usize,
    weapon_changes: usize,
    messages: usize,
}

impl EventCounts {
    fn of(game: &Match) -> Self {
        let mut counts = Self::default();
        for event in &game.events {
            match event.kind {
                EventKind::Kill(_) => counts.kills += 1,
                EventKind::Death(_) => counts.deaths += 1,
                EventKind::Join(_) => counts.joins += 1,
                EventKind::WeaponChange(_) => counts.weapon_changes += 1,
                EventKind::Message(_) => counts.messages += 1,
            }
        }
        counts
    }
}

fn show_stats(path: &Path, skip_to: i64) -> Result<()> {
    let result = parse_log_file(path, skip_to)?;
    let skipped = result.matches.iter().filter(|m| m.skip).count();

    println!("Game Log Statistics");
    println!("===================");
    println!("Log file: {}", path.display());
    println!("Total matches: {}", result.matches.len());
    println!("  Skipped: {}", skipped);
    println!("Last log time: {}", format_log_time(result.last_log_time));

    for (number, game) in result.matches.iter().enumerate() {
        println!();
        println!("Match #{}: {} ({})", number + 1, game.map, game.game_type);

        let finished = match game.finished {
            Some(finished) => format_log_time(finished),
            None => "still running".to_string(),
        };
        println!("  {} -> {}", format_log_time(game.began), finished);
        if let Some(duration) = game.duration_secs() {
            println!("  Duration: {}", format_duration(duration));
        }

        if game.skip {
            println!("  Events: skipped");
            continue;
        }

        let counts = EventCounts::of(game);
        println!(
            "  Events: {} ({} kills, {} deaths, {} joins, {} weapon changes, {} messages)",
            game.events.len(),
            counts.kills,
            counts.deaths,
            counts.joins,
            counts.weapon_changes,
            counts.messages
        );
    }

    Ok(())
}
