//! Command-line driver for the grid ecosystem.
//!
//! Runs a seeded world for a fixed number of turns, printing the census and
//! grid before every turn and mirroring the output into a timestamped run log.

mod run_log;
mod telemetry;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use eco_core::{EcosystemConfig, Position};
use eco_world::{CellGlyph, Session, World};
use run_log::{render_frame, RunLog};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "eco-sim")]
#[command(version)]
#[command(about = "Predator/prey/plant ecosystem on a 2D grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of turns to simulate
        #[arg(short, long, default_value = "100")]
        turns: u64,

        /// Random seed, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,

        /// Coordinate to mark and dump every turn, as X,Y
        #[arg(long, value_parser = parse_position)]
        debug_cell: Option<Position>,

        /// Directory for run logs
        #[arg(long, default_value = "results")]
        results_dir: PathBuf,

        /// Do not write a run log
        #[arg(long)]
        no_log_file: bool,

        /// Only print the final census
        #[arg(short, long)]
        quiet: bool,

        /// Emit logs as JSON
        #[arg(long)]
        log_json: bool,
    },

    /// Print the default configuration as JSON
    DumpDefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            turns,
            seed,
            debug_cell,
            results_dir,
            no_log_file,
            quiet,
            log_json,
        } => {
            telemetry::init_telemetry(log_json)?;

            let mut config = match config {
                Some(path) => EcosystemConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => EcosystemConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }

            let run_log = if no_log_file {
                None
            } else {
                Some(RunLog::create(&results_dir, Local::now())?)
            };

            let result = run(config, turns, debug_cell, run_log, quiet);
            if let Err(e) = &result {
                error!("Run failed: {:#}", e);
            }
            result
        }
        Commands::DumpDefaultConfig => {
            println!("{}", EcosystemConfig::default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn run(
    config: EcosystemConfig,
    turns: u64,
    debug_cell: Option<Position>,
    mut run_log: Option<RunLog>,
    quiet: bool,
) -> Result<()> {
    info!(
        "Starting ecosystem: {}x{} grid, seed {}, {} turns",
        config.width, config.height, config.seed, turns
    );
    debug!("Configuration: {:?}", config);

    let world = World::new(config).context("failed to build world")?;
    let mut session = Session::new(world, turns, debug_cell);

    if !quiet {
        print_legend();
    }

    let mut write_error = None;
    let summary = session.run(|frame| {
        let text = render_frame(frame);
        if !quiet {
            print!("{text}");
            println!();
        }
        if let Some(log) = run_log.as_mut() {
            if write_error.is_none() {
                write_error = log.write_frame(frame).err();
            }
        }
    });
    if let Some(e) = write_error {
        return Err(e.context("failed to write run log"));
    }

    println!("Final: {summary}");

    let stats = session.world().lifetime_stats();
    let stats_json = serde_json::to_string(stats)?;
    info!("Lifetime stats: {}", stats_json);

    if let Some(mut log) = run_log {
        log.write_line(&format!("Final: {summary}"))?;
        log.write_line(&format!("Lifetime stats: {stats_json}"))?;
        let path = log.finish()?;
        info!("Run log written to {}", path.display());
    }

    Ok(())
}

fn print_legend() {
    let legend: Vec<String> = CellGlyph::legend()
        .iter()
        .map(|(c, label)| format!("{c}={label}"))
        .collect();
    println!("Legend: {}", legend.join(", "));
}

fn parse_position(s: &str) -> Result<Position> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected X,Y, got {s:?}");
    };
    let x = x.trim().parse().with_context(|| format!("bad x coordinate in {s:?}"))?;
    let y = y.trim().parse().with_context(|| format!("bad y coordinate in {s:?}"))?;
    Ok(Position::new(x, y))
}
