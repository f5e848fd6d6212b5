//! Configuration system for evolution runs.
//!
//! Supports YAML configuration files with sensible defaults. A configuration
//! is immutable once a run starts.

use crate::agent::Bounds;
use crate::error::ConfigError;
use crate::evolution::MutationSchedule;
use crate::neural::{MergeStrategy, DEFAULT_HIDDEN_NEURONS};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub neural: NeuralConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World/environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of the square world
    pub edge_length: f32,
    /// Size of a drawn agent, kept inside the far edges (0 = point agents)
    pub object_size: f32,
    /// Fixed goal; drawn at random when absent
    pub goal: Option<Position>,
    /// Fixed start position shared by every agent; drawn at random when absent
    pub start: Option<Position>,
}

/// Generation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of generations to run
    pub generations: usize,
    /// Simulation ticks per generation
    pub ticks: usize,
    /// Agents per generation
    pub population_size: usize,
    /// Agents kept to breed the next generation
    pub elite_size: usize,
    /// Evaluate agents on the rayon pool
    pub parallel: bool,
}

/// Neural network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuralConfig {
    /// Width of the hidden layer
    pub hidden_neurons: usize,
}

/// Evolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// How parent networks are combined
    pub merge_strategy: MergeStrategy,
    /// Mutation chance when the best agent sits on the goal
    pub mutation_c: f32,
    /// Exponent scale of the mutation schedule
    pub mutation_limit: f32,
    /// Upper bound on the mutation chance
    pub max_mutation_chance: f32,
}

/// Reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Generations between summary log lines (0 = never)
    pub report_interval: usize,
    /// Generations between recorded playbacks (0 = never)
    pub playback_interval: usize,
    /// Record only the elite in playbacks
    pub playback_elite_only: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            edge_length: 1000.0,
            object_size: 0.0,
            goal: None,
            start: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generations: 10_000,
            ticks: 1000,
            population_size: 100,
            elite_size: 4,
            parallel: true,
        }
    }
}

impl Default for NeuralConfig {
    fn default() -> Self {
        Self {
            hidden_neurons: DEFAULT_HIDDEN_NEURONS,
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            merge_strategy: MergeStrategy::SingleSplit,
            mutation_c: 0.01,
            mutation_limit: 6.0,
            max_mutation_chance: 0.99,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            report_interval: 1,
            playback_interval: 0,
            playback_elite_only: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// World limits for movement clamping
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world.edge_length).with_object_size(self.world.object_size)
    }

    /// Adaptive mutation schedule
    pub fn mutation_schedule(&self) -> MutationSchedule {
        MutationSchedule {
            c: self.evolution.mutation_c,
            limit: self.evolution.mutation_limit,
            cap: self.evolution.max_mutation_chance,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        let world = &self.world;
        if !world.edge_length.is_finite() || world.edge_length <= 0.0 {
            return invalid("edge_length must be a positive number");
        }
        if !(0.0..world.edge_length).contains(&world.object_size) {
            return invalid("object_size must be in [0, edge_length)");
        }

        let bounds = self.bounds();
        for (name, pos) in [("goal", &world.goal), ("start", &world.start)] {
            if let Some(pos) = pos {
                if !bounds.contains(pos) {
                    return Err(ConfigError::Invalid(format!(
                        "{name} ({}, {}) lies outside [0, {}]",
                        pos.x,
                        pos.y,
                        bounds.limit()
                    )));
                }
            }
        }

        let gen = &self.generation;
        if gen.generations == 0 {
            return invalid("generations must be > 0");
        }
        if gen.population_size == 0 {
            return invalid("population_size must be > 0");
        }
        if gen.elite_size < 2 {
            return invalid("elite_size must be at least 2 to breed");
        }
        if gen.elite_size > gen.population_size {
            return invalid("elite_size cannot exceed population_size");
        }

        if self.neural.hidden_neurons == 0 {
            return invalid("hidden_neurons must be > 0");
        }

        let evo = &self.evolution;
        if !evo.mutation_c.is_finite() || evo.mutation_c < 0.0 {
            return invalid("mutation_c must be a non-negative number");
        }
        if !evo.mutation_limit.is_finite() {
            return invalid("mutation_limit must be finite");
        }
        if !(0.0..=1.0).contains(&evo.max_mutation_chance) {
            return invalid("max_mutation_chance must be in [0, 1]");
        }

        Ok(())
    }
}
