//! # homing
//!
//! Generational neuroevolution of goal-seeking agents.
//!
//! Every agent carries a small two-layer network that reads its displacement
//! to a goal and decides how far, and in which direction, to move each tick.
//! After a fixed number of ticks agents are ranked by distance to the goal;
//! the best few are crossed over and mutated to form the next generation.
//!
//! ## Features
//!
//! - **Reproducible**: every random draw comes from one seeded [`RandomSource`]
//! - **Three crossover strategies**: every-other, single-split, random-choice
//! - **Adaptive mutation**: the mutation chance follows the elite's distance
//! - **Parallel ticks**: agents move on the Rayon pool with identical results
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use homing::{Config, GenerationController, RandomSource};
//! use homing::stats::GenerationHistory;
//!
//! let mut config = Config::default();
//! config.generation.generations = 50;
//!
//! let mut controller = GenerationController::new(config, RandomSource::from_seed(42)).unwrap();
//! let mut history = GenerationHistory::new();
//! controller.run(&mut history).unwrap();
//!
//! println!("Best distance: {:?}", controller.best_fitness());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use homing::Config;
//! use homing::neural::MergeStrategy;
//!
//! let mut config = Config::default();
//! config.generation.population_size = 200;
//! config.evolution.merge_strategy = MergeStrategy::RandomChoice;
//! assert!(config.validate().is_ok());
//! ```

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod evolution;
pub mod neural;
pub mod observer;
pub mod playback;
pub mod position;
pub mod random;
pub mod stats;

// Re-export main types
pub use agent::{Agent, Bounds};
pub use config::Config;
pub use controller::{GenerationController, Phase};
pub use error::{ConfigError, EvolveError, NeuralError};
pub use position::Position;
pub use random::RandomSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time a short run with the given population size
pub fn benchmark(
    generations: usize,
    population: usize,
    seed: u64,
) -> Result<BenchmarkResult, EvolveError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.generation.generations = generations;
    config.generation.population_size = population;
    config.generation.elite_size = config.generation.elite_size.min(population);

    let ticks = config.generation.ticks;
    let mut controller = GenerationController::new(config, RandomSource::from_seed(seed))?;

    let start = Instant::now();
    let last = controller.run(&mut ())?;
    let elapsed = start.elapsed();

    let agent_ticks = (generations * population * ticks) as f64;

    Ok(BenchmarkResult {
        generations,
        population,
        ticks,
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
        agent_ticks_per_second: agent_ticks / elapsed.as_secs_f64(),
        best_fitness: last.map(|s| s.best_fitness),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: usize,
    pub population: usize,
    pub ticks: usize,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
    pub agent_ticks_per_second: f64,
    pub best_fitness: Option<f32>,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Population: {} ({} ticks)", self.population, self.ticks)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.2} generations/s", self.generations_per_second)?;
        writeln!(f, "Throughput: {:.0} agent-ticks/s", self.agent_ticks_per_second)?;
        if let Some(best) = self.best_fitness {
            writeln!(f, "Best distance: {:.2}", best)?;
        }
        Ok(())
    }
}
