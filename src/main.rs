//! homing - CLI entry point
//!
//! Evolves goal-seeking agents and reports progress per generation.

use clap::{Parser, Subcommand};
use homing::playback::PlaybackRecorder;
use homing::stats::{GenerationHistory, LogReporter};
use homing::{benchmark, Config, GenerationController, RandomSource};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "homing")]
#[command(version)]
#[command(about = "Generational neuroevolution of goal-seeking agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an evolution
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Override the number of generations
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output directory for history and playbacks
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (no per-generation log lines)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Time a short run
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "5")]
        generations: usize,

        /// Population size
        #[arg(short, long, default_value = "100")]
        population: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            output,
            seed,
            quiet,
        } => run_evolution(&config, generations, &output, seed, quiet),

        Commands::Benchmark {
            generations,
            population,
            seed,
        } => {
            init_logging("info");
            run_benchmark(generations, population, seed)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(&output)
        }
    }
}

/// `RUST_LOG` wins over the configured level
fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_evolution(
    config_path: &Path,
    generations: Option<usize>,
    output: &Path,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let (mut config, loaded) = if config_path.exists() {
        (Config::from_file(config_path)?, true)
    } else {
        (Config::default(), false)
    };
    if let Some(generations) = generations {
        config.generation.generations = generations;
    }

    init_logging(&config.logging.log_level);
    if loaded {
        log::info!("Loaded config from {:?}", config_path);
    } else {
        log::info!("Using default configuration");
    }

    std::fs::create_dir_all(output)?;

    let rng = match seed {
        Some(s) => RandomSource::from_seed(s),
        None => RandomSource::from_entropy(),
    };

    log::info!(
        "Starting evolution: {} generations x {} agents x {} ticks (elite {})",
        config.generation.generations,
        config.generation.population_size,
        config.generation.ticks,
        config.generation.elite_size
    );

    let report_interval = if quiet { 0 } else { config.logging.report_interval };
    let mut observers = (
        (GenerationHistory::new(), LogReporter::new(report_interval)),
        PlaybackRecorder::new(
            config.logging.playback_interval,
            config.logging.playback_elite_only,
        ),
    );

    let mut controller = GenerationController::new(config, rng)?;

    let start = Instant::now();
    controller.run(&mut observers)?;
    let elapsed = start.elapsed();

    let ((history, _), playbacks) = observers;

    println!();
    println!("=== Evolution Complete ===");
    println!("Seed: {}", controller.seed());
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", controller.generation());
    println!(
        "Goal: ({:.1}, {:.1})  Start: ({:.1}, {:.1})",
        controller.goal().x,
        controller.goal().y,
        controller.start().x,
        controller.start().y
    );
    if let Some(best) = history.best_ever() {
        println!(
            "Best distance: {:.2} (generation {})",
            best.best_fitness, best.generation
        );
    }

    let history_path = output.join("history.json");
    history.save(&history_path)?;
    println!("History: {:?}", history_path);

    if !playbacks.playbacks.is_empty() {
        let playback_path = output.join("playback.json");
        playbacks.save(&playback_path)?;
        println!(
            "Playbacks: {:?} ({} generations)",
            playback_path,
            playbacks.playbacks.len()
        );
    }

    Ok(())
}

fn run_benchmark(
    generations: usize,
    population: usize,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== homing Benchmark ===");
    println!("Generations: {}", generations);
    println!("Population: {}", population);
    println!();

    let result = benchmark(generations, population, seed)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
