//! Statistics tracking for evolution runs.

use crate::observer::{GenerationObserver, GenerationReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics snapshot for one ranked generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Zero-based generation index
    pub generation: usize,
    /// Number of agents ranked
    pub population: usize,
    /// Lowest distance to the goal
    pub best_fitness: f32,
    /// Mean distance to the goal
    pub mean_fitness: f32,
    /// Highest distance to the goal
    pub worst_fitness: f32,
    /// Mutation chance used to breed this generation
    pub mutation_chance: f32,
}

impl GenerationStats {
    pub fn from_report(report: &GenerationReport<'_>) -> Self {
        Self {
            generation: report.generation,
            population: report.ranked.len(),
            best_fitness: report.best_fitness().unwrap_or(f32::NAN),
            mean_fitness: report.mean_fitness().unwrap_or(f32::NAN),
            worst_fitness: report.worst_fitness().unwrap_or(f32::NAN),
            mutation_chance: report.mutation_chance,
        }
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:6} | Pop:{:4} | Best:{:8.2} | Mean:{:8.2} | Worst:{:8.2} | Mut:{:.4}",
            self.generation,
            self.population,
            self.best_fitness,
            self.mean_fitness,
            self.worst_fitness,
            self.mutation_chance,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationHistory {
    /// All recorded snapshots, in generation order
    pub snapshots: Vec<GenerationStats>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: GenerationStats) {
        self.snapshots.push(stats);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&GenerationStats> {
        self.snapshots.last()
    }

    /// Best fitness over time
    pub fn best_series(&self) -> Vec<(usize, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.best_fitness))
            .collect()
    }

    /// Mutation chance over time
    pub fn mutation_series(&self) -> Vec<(usize, f32)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.mutation_chance))
            .collect()
    }

    /// Lowest best fitness seen so far
    pub fn best_ever(&self) -> Option<&GenerationStats> {
        self.snapshots
            .iter()
            .min_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
    }

    /// Save history to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl GenerationObserver for GenerationHistory {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self.record(GenerationStats::from_report(report));
    }
}

/// Logs a summary line every `interval` generations
#[derive(Clone, Debug)]
pub struct LogReporter {
    pub interval: usize,
}

impl LogReporter {
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl GenerationObserver for LogReporter {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        if self.interval == 0 || report.generation % self.interval != 0 {
            return;
        }
        log::info!("{}", GenerationStats::from_report(report).summary());
    }
}
