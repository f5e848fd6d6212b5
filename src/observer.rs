//! Hooks for collaborators that watch a run without taking part in it.
//!
//! Visualisation and reporting sit outside the evolutionary core. They get a
//! read-only [`GenerationReport`] after each generation has been ranked.

use crate::evolution::RankedAgent;
use crate::position::Position;

/// Everything known about a generation once it has been ranked
#[derive(Debug)]
pub struct GenerationReport<'a> {
    /// Zero-based generation index
    pub generation: usize,
    pub goal: Position,
    pub start: Position,
    /// Mutation chance used to breed this generation (0 for the seeded one)
    pub mutation_chance: f32,
    /// Whole population, best first
    pub ranked: &'a [RankedAgent],
    /// Number of leading entries of `ranked` kept as the elite
    pub elite_size: usize,
}

impl GenerationReport<'_> {
    /// Agents kept to breed the next generation
    pub fn elite(&self) -> &[RankedAgent] {
        &self.ranked[..self.elite_size.min(self.ranked.len())]
    }

    pub fn best_fitness(&self) -> Option<f32> {
        self.ranked.first().map(|r| r.fitness)
    }

    pub fn worst_fitness(&self) -> Option<f32> {
        self.ranked.last().map(|r| r.fitness)
    }

    pub fn mean_fitness(&self) -> Option<f32> {
        if self.ranked.is_empty() {
            return None;
        }
        let sum: f32 = self.ranked.iter().map(|r| r.fitness).sum();
        Some(sum / self.ranked.len() as f32)
    }
}

/// Receives a report after every ranked generation
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport<'_>);
}

impl GenerationObserver for () {
    fn on_generation(&mut self, _report: &GenerationReport<'_>) {}
}

impl<A: GenerationObserver, B: GenerationObserver> GenerationObserver for (A, B) {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self.0.on_generation(report);
        self.1.on_generation(report);
    }
}

impl<T: GenerationObserver + ?Sized> GenerationObserver for &mut T {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        (**self).on_generation(report);
    }
}
