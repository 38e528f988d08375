mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use labyrinth_common::SplitMix64;
use labyrinth_input::Action;
use labyrinth_kernel::{Phase, SimConfig, Simulation};
use labyrinth_maze::MazeGenerator;
use labyrinth_tools::{MazeInspector, validate};
use rand::RngCore;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::script::{Driver, Script};

#[derive(Parser)]
#[command(name = "labyrinth-cli", about = "Generate mazes and run scripted labyrinth sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML file with simulation settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and effective configuration
    Info,
    /// Generate a maze and print it
    Generate {
        /// Grid side length (odd, >= 5); overrides the config file
        #[arg(long)]
        size: Option<usize>,
        /// RNG seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// Emit JSON instead of an ASCII map
        #[arg(long)]
        json: bool,
    },
    /// Play a session with a scripted input source
    Run {
        /// Grid side length (odd, >= 5); overrides the config file
        #[arg(long)]
        size: Option<usize>,
        /// RNG seed; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// Input script to drive the player
        #[arg(long, value_enum, default_value = "solve")]
        script: Script,
        /// Maximum ticks before giving up
        #[arg(short, long, default_value = "5000")]
        ticks: u64,
        /// Keep playing fresh mazes after each win
        #[arg(long, default_value = "1")]
        rounds: u32,
    },
    /// Generate many mazes and check each is a closed perfect maze
    Verify {
        /// Grid side length (odd, >= 5); overrides the config file
        #[arg(long)]
        size: Option<usize>,
        /// Number of consecutive seeds to check
        #[arg(long, default_value = "100")]
        seeds: u64,
        /// First seed of the range
        #[arg(long, default_value = "0")]
        first: u64,
    },
}

#[derive(Serialize)]
struct GeneratedMaze {
    seed: u64,
    size: usize,
    start: [i32; 2],
    goal: [i32; 2],
    carved: usize,
    rows: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("labyrinth-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("config: {config:?}");
        }
        Commands::Generate { size, seed, json } => {
            override_size(&mut config, size)?;
            let seed = resolve_seed(seed);
            let maze = MazeGenerator::new(config.maze_size)?.generate(&mut SplitMix64::new(seed));
            if json {
                let out = GeneratedMaze {
                    seed,
                    size: maze.grid.size(),
                    start: [maze.start.x, maze.start.z],
                    goal: [maze.goal.x, maze.goal.z],
                    carved: maze.carved,
                    rows: maze.grid.to_ascii().lines().map(str::to_owned).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", MazeInspector::render(&maze.grid, None, Some(maze.goal)));
                let report = validate(&maze)?;
                println!(
                    "seed={seed} size={} paths={} dead_ends={} goal=({}, {}) distance={}",
                    report.size,
                    report.path_cells,
                    report.dead_ends,
                    maze.goal.x,
                    maze.goal.z,
                    report.goal_distance
                );
            }
        }
        Commands::Run {
            size,
            seed,
            script,
            ticks,
            rounds,
        } => {
            override_size(&mut config, size)?;
            let seed = resolve_seed(seed);
            run_session(config, seed, script, ticks, rounds)?;
        }
        Commands::Verify { size, seeds, first } => {
            override_size(&mut config, size)?;
            let generator = MazeGenerator::new(config.maze_size)?;
            for seed in first..first.saturating_add(seeds) {
                let maze = generator.generate(&mut SplitMix64::new(seed));
                validate(&maze).with_context(|| format!("seed {seed} failed validation"))?;
            }
            println!(
                "verified {seeds} mazes of size {} (seeds {first}..{})",
                config.maze_size,
                first.saturating_add(seeds)
            );
        }
    }

    Ok(())
}

fn override_size(config: &mut SimConfig, size: Option<usize>) -> anyhow::Result<()> {
    if let Some(size) = size {
        config.maze_size = size;
    }
    config.validate()?;
    Ok(())
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = rand::thread_rng().next_u64();
        tracing::info!(seed, "no seed given, drew one at random");
        seed
    })
}

fn run_session(
    config: SimConfig,
    seed: u64,
    script: Script,
    max_ticks: u64,
    rounds: u32,
) -> anyhow::Result<()> {
    let mut sim = Simulation::new(config.clone(), seed)?;
    let mut driver = Driver::new(script, seed);
    sim.apply(Action::Start)?;
    println!("{}", MazeInspector::summary(&sim));

    let mut wins = 0;
    for _ in 0..max_ticks {
        let input = driver.next_input(&sim);
        let outcome = sim.apply(Action::Tick(input))?;
        if outcome.tick % 500 == 0 {
            tracing::debug!("{}", MazeInspector::summary(&sim));
        }
        if outcome.phase == Phase::Won {
            wins += 1;
            println!("goal reached at tick {}", outcome.tick);
            if wins >= rounds {
                break;
            }
            sim.apply(Action::Restart)?;
            println!("{}", MazeInspector::summary(&sim));
        }
    }

    if let Some(map) = MazeInspector::render_session(&sim) {
        print!("{map}");
    }
    println!("{}", MazeInspector::summary(&sim));
    sim.apply(Action::Quit)?;

    let replayed = Simulation::replay(config, seed, sim.actions())?;
    anyhow::ensure!(
        replayed.state_hash() == sim.state_hash(),
        "replay diverged: {:#x} != {:#x}",
        replayed.state_hash(),
        sim.state_hash()
    );
    println!(
        "rounds won: {wins}/{rounds}, replay hash {:#x} OK",
        sim.state_hash()
    );
    Ok(())
}
