//! Silk Road Simulator
//!
//! Solves and replays day schedules of robots and stores from the command
//! line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use road_core::output::write_snapshot;
use road_core::{default_config_toml, ContestSolver, NoticeLogger, RoadConfig, Simulation};
use road_events::Schedule;

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "silk_road")]
#[command(about = "Robots, stores and the most profitable way to pair them")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the best profit reachable after each day as a JSON array
    Solve {
        /// Schedule file: JSON array of integer rows
        schedule: PathBuf,
    },
    /// Replay a schedule day by day, optimize, and print the profit
    Simulate {
        /// Schedule file: JSON array of integer rows
        schedule: PathBuf,

        /// Walk robots cell by cell (overrides the config file)
        #[arg(long, conflicts_with = "fast")]
        slow: bool,

        /// Reposition robots instantly (overrides the config file)
        #[arg(long)]
        fast: bool,

        /// Random seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write render notices to this JSONL file
        #[arg(long)]
        notices: Option<PathBuf>,

        /// Write the road state after optimizing to this JSON file
        #[arg(long)]
        stats: Option<PathBuf>,
    },
    /// Print the default configuration
    DefaultConfig,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Solve { schedule } => {
            let schedule = Schedule::from_file(&schedule)?;
            let profits = ContestSolver::solve(&schedule);
            println!("{}", serde_json::to_string(&profits)?);
        }
        Command::Simulate {
            schedule,
            slow,
            fast,
            seed,
            config,
            notices,
            stats,
        } => {
            let schedule = Schedule::from_file(&schedule)?;
            let mut config = match config {
                Some(path) => RoadConfig::from_file(&path)?,
                None => RoadConfig::default(),
            };
            if let Some(seed) = seed {
                config.simulation.seed = seed;
            }
            if slow || fast {
                config.simulation.fast_movement = fast;
            }
            if notices.is_some() {
                config.output.notice_log = notices;
            }

            info!(
                days = schedule.declared_events,
                length = schedule.road_length(),
                seed = config.simulation.seed,
                fast = config.simulation.fast_movement,
                "loaded schedule"
            );

            let mut simulation = Simulation::from_schedule(schedule).with_config(&config);
            if let Some(path) = &config.output.notice_log {
                simulation = simulation.with_sink(NoticeLogger::new(path)?);
                info!(path = %path.display(), "logging notices");
            }

            let outcome = ContestSolver::replay(simulation)?;
            if let Some(path) = stats {
                write_snapshot(&path, &outcome.snapshot)?;
                info!(path = %path.display(), "wrote statistics");
            }
            println!("{}", outcome.profit);
        }
        Command::DefaultConfig => {
            print!("{}", default_config_toml());
        }
    }
    Ok(())
}
