//! GRIDLIFE - CLI entry point.
//!
//! Thin I/O boundary around the engine: loads and reconciles the
//! configuration, builds the initial grid (seed file or random fallback),
//! runs the simulation, and prints plain-text results.

use clap::{Parser, Subcommand};
use gridlife::engine::{Engine, Halt};
use gridlife::{seed, Config, Grid};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridlife")]
#[command(version)]
#[command(about = "Generalized life-like cellular automaton simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Seed file (overrides the configured one)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// RNG seed for the random-grid fallback
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Quiet mode (final report only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Re-encode a seed file in v1 coordinate-list form
    Convert {
        /// Seed file to decode (v1 or v2)
        input: PathBuf,

        /// Output path
        output: PathBuf,

        /// Board rows to decode against
        #[arg(long, default_value = "12")]
        rows: usize,

        /// Board columns to decode against
        #[arg(long, default_value = "45")]
        columns: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            rng_seed,
            quiet,
        } => run_simulation(config, seed, rng_seed, quiet),

        Commands::Init { output } => generate_config(output),

        Commands::Convert {
            input,
            output,
            rows,
            columns,
        } => convert_seed(input, output, rows, columns),
    }
}

fn run_simulation(
    config_path: PathBuf,
    seed_override: Option<PathBuf>,
    rng_seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    for warning in config.reconcile() {
        log::warn!("{}", warning);
    }

    let seed_path = seed_override.or_else(|| config.seed_file.clone());
    let grid = build_grid(&config, seed_path.as_deref(), rng_seed);

    println!("Starting simulation");
    println!("  Board: {}x{}", config.rows, config.columns);
    println!("  Survival: {}  Birth: {}", config.survival, config.birth);
    println!("  Neighbourhood: {}", config.neighbourhood);
    println!("  Generation limit: {}", config.generations);
    println!();

    let output_file = config.output_file.clone();
    let ghost = config.ghost;
    let mut engine = Engine::new(config, grid);

    let report = engine.run_with_callback(|engine| {
        if quiet {
            return;
        }
        println!("Generation {}", engine.generation());
        if ghost {
            print_overlay(&engine.ghost_overlay());
        } else {
            print!("{}", engine.grid());
        }
        println!();
    });

    println!("=== Simulation Complete ===");
    println!("Generations: {}", report.generations);
    match report.halt {
        Halt::Steady {
            periodicity,
            fixed_point: true,
        } => println!("Steady state reached (fixed point, raw periodicity {})", periodicity),
        Halt::Steady { periodicity, .. } => {
            println!("Steady state reached with periodicity {}", periodicity)
        }
        Halt::GenerationLimit => println!("No steady state within the generation limit"),
    }
    println!("Alive cells: {}", engine.grid().count_alive());

    if let Some(path) = output_file {
        seed::save(engine.grid(), &path)?;
        println!("Final grid written to: {:?}", path);
    }

    Ok(())
}

/// Decode the seed file if one was given, falling back to a random grid
/// on any decode error.
fn build_grid(config: &Config, seed_path: Option<&std::path::Path>, rng_seed: Option<u64>) -> Grid {
    if let Some(path) = seed_path {
        match seed::load(path, config.rows, config.columns) {
            Ok(grid) => {
                println!("Seed loaded from: {:?}", path);
                return grid;
            }
            Err(e) => log::warn!("{}; falling back to a random grid", e),
        }
    }

    let seed_value = rng_seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed_value);
    let mut grid = Grid::new(config.rows, config.columns);
    grid.randomize(&mut rng, config.random_factor);
    println!("Random grid (seed {}, factor {})", seed_value, config.random_factor);
    grid
}

fn print_overlay(overlay: &[Vec<u8>]) {
    for row in overlay {
        let line: String = row
            .iter()
            .map(|&v| match v {
                1 => '#',
                2 => '+',
                3 => ':',
                4 => '.',
                _ => ' ',
            })
            .collect();
        println!("{}", line);
    }
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn convert_seed(
    input: PathBuf,
    output: PathBuf,
    rows: usize,
    columns: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = seed::load(&input, rows, columns)?;
    seed::save(&grid, &output)?;
    println!(
        "Converted {:?} -> {:?} ({} alive cells)",
        input,
        output,
        grid.count_alive()
    );
    Ok(())
}
