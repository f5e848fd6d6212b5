//! Evolution mechanics: population creation, simulation, ranking and selection.

use crate::agent::{Agent, Bounds, NUM_SENSORS};
use crate::error::EvolveError;
use crate::neural::MergeStrategy;
use crate::position::Position;
use crate::random::RandomSource;
use rayon::prelude::*;
use std::cmp::Ordering;

/// An agent scored against the goal
#[derive(Clone, Debug)]
pub struct RankedAgent {
    pub agent: Agent,
    /// Distance from the final position to the goal (lower is better)
    pub fitness: f32,
    /// Position of the agent in the population it was ranked from
    pub index: usize,
}

impl RankedAgent {
    /// Total order: fitness, then population order
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then(self.index.cmp(&other.index))
    }
}

/// Adaptive mutation chance keyed off the best distance to the goal.
///
/// `chance = min(c * 2^(ratio * limit), cap)` with `ratio = best / max_distance`:
/// small near the goal, growing up to `cap` as the best agent strays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MutationSchedule {
    pub c: f32,
    pub limit: f32,
    pub cap: f32,
}

impl Default for MutationSchedule {
    fn default() -> Self {
        Self {
            c: 0.01,
            limit: 6.0,
            cap: 0.99,
        }
    }
}

impl MutationSchedule {
    pub fn chance(&self, best_distance: f32, max_distance: f32) -> f32 {
        next_mutation_chance(best_distance, max_distance, self.c, self.limit, self.cap)
    }
}

/// Mutation chance for the next generation
pub fn next_mutation_chance(
    best_distance: f32,
    max_distance: f32,
    c: f32,
    limit: f32,
    cap: f32,
) -> f32 {
    let ratio = best_distance / max_distance;
    (c * 2f32.powf(ratio * limit)).min(cap)
}

/// Create `population_size` agents with random networks at `seed`
pub fn seed_population(
    seed: Position,
    population_size: usize,
    hidden_neurons: usize,
    rng: &mut RandomSource,
) -> Vec<Agent> {
    (0..population_size)
        .map(|_| Agent::with_hidden(seed, NUM_SENSORS, hidden_neurons, rng))
        .collect()
}

/// Breed `population_size` children from pairs of distinct elite parents
pub fn breed_population(
    elite: &[RankedAgent],
    seed: Position,
    strategy: MergeStrategy,
    mutation_chance: f32,
    population_size: usize,
    rng: &mut RandomSource,
) -> Result<Vec<Agent>, EvolveError> {
    if elite.len() < 2 {
        return Err(EvolveError::InsufficientElite {
            available: elite.len(),
        });
    }

    let last = elite.len() - 1;
    let mut population = Vec::with_capacity(population_size);

    for _ in 0..population_size {
        let a = rng.uniform_int(0, last);
        let mut b = rng.uniform_int(0, last);
        while b == a {
            b = rng.uniform_int(0, last);
        }

        let child = Agent::from_parents(
            seed,
            &elite[a].agent,
            &elite[b].agent,
            strategy,
            mutation_chance,
            rng,
        )?;
        population.push(child);
    }

    Ok(population)
}

/// Step every agent through `ticks` ticks, tick by tick in population order
pub fn simulate(population: &mut [Agent], goal: &Position, ticks: usize, bounds: &Bounds) {
    for agent in population.iter_mut() {
        agent.reserve_ticks(ticks);
    }

    for _ in 0..ticks {
        for agent in population.iter_mut() {
            let sensors = agent.sensors(goal, bounds.edge_length);
            agent.move_agent(&sensors, bounds);
        }
    }
}

/// Same trajectories as [`simulate`], with agents spread over the rayon pool.
///
/// Agents never read each other's state and no random draws happen while
/// moving, so the result does not depend on scheduling.
pub fn simulate_parallel(population: &mut [Agent], goal: &Position, ticks: usize, bounds: &Bounds) {
    population.par_iter_mut().for_each(|agent| {
        agent.reserve_ticks(ticks);
        for _ in 0..ticks {
            let sensors = agent.sensors(goal, bounds.edge_length);
            agent.move_agent(&sensors, bounds);
        }
    });
}

/// Score every agent and sort ascending by fitness; ties keep population order
pub fn rank(population: Vec<Agent>, goal: &Position) -> Vec<RankedAgent> {
    let mut ranked: Vec<RankedAgent> = population
        .into_iter()
        .enumerate()
        .map(|(index, agent)| RankedAgent {
            fitness: agent.fitness(goal),
            agent,
            index,
        })
        .collect();

    ranked.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    ranked
}

/// Keep the `k` best entries, best first, dropping the rest
pub fn select_elite(mut ranked: Vec<RankedAgent>, k: usize) -> Vec<RankedAgent> {
    if k == 0 {
        return Vec::new();
    }
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, RankedAgent::cmp_rank);
        ranked.truncate(k);
    }
    ranked.sort_unstable_by(RankedAgent::cmp_rank);
    ranked
}
