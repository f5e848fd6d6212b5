//! Generation controller - the main evolution loop.

use crate::agent::{Agent, Bounds};
use crate::config::Config;
use crate::error::EvolveError;
use crate::evolution::{
    breed_population, rank, seed_population, select_elite, simulate, simulate_parallel,
    MutationSchedule, RankedAgent,
};
use crate::observer::{GenerationObserver, GenerationReport};
use crate::position::Position;
use crate::random::RandomSource;
use crate::stats::GenerationStats;

/// Where the controller is in its generation cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Generation 0 has not been created yet
    SeedingInitialPopulation,
    /// A population exists and has not moved yet
    Simulating,
    /// The population has moved and waits to be scored
    Ranking,
    /// An elite is waiting to breed the next population
    BreedingNext,
    /// All configured generations have been ranked
    Finished,
}

/// Runs the generational loop for one goal
pub struct GenerationController {
    config: Config,
    bounds: Bounds,
    schedule: MutationSchedule,

    // Fixed for the whole run
    goal: Position,
    start: Position,

    // State
    phase: Phase,
    generation: usize,
    population: Vec<Agent>,
    elite: Vec<RankedAgent>,
    mutation_chance: f32,
    last_stats: Option<GenerationStats>,

    rng: RandomSource,
}

impl GenerationController {
    /// Validate `config` and fix the goal and start position for the run
    pub fn new(config: Config, mut rng: RandomSource) -> Result<Self, EvolveError> {
        config.validate()?;

        let bounds = config.bounds();
        let goal = match config.world.goal {
            Some(goal) => goal,
            None => bounds.random_position(&mut rng),
        };
        let start = match config.world.start {
            Some(start) => start,
            None => bounds.random_position(&mut rng),
        };

        log::info!(
            "Controller ready: seed={} goal=({:.1}, {:.1}) start=({:.1}, {:.1}) strategy={:?}",
            rng.seed(),
            goal.x,
            goal.y,
            start.x,
            start.y,
            config.evolution.merge_strategy
        );

        Ok(Self {
            schedule: config.mutation_schedule(),
            bounds,
            config,
            goal,
            start,
            phase: Phase::SeedingInitialPopulation,
            generation: 0,
            population: Vec::new(),
            elite: Vec::new(),
            mutation_chance: 0.0,
            last_stats: None,
            rng,
        })
    }

    /// Perform one state transition and return the new phase
    pub fn advance<O>(&mut self, observer: &mut O) -> Result<Phase, EvolveError>
    where
        O: GenerationObserver + ?Sized,
    {
        let gen = &self.config.generation;

        match self.phase {
            Phase::SeedingInitialPopulation => {
                self.population = seed_population(
                    self.start,
                    gen.population_size,
                    self.config.neural.hidden_neurons,
                    &mut self.rng,
                );
                self.mutation_chance = 0.0;
                self.phase = Phase::Simulating;
            }

            Phase::Simulating => {
                if gen.parallel {
                    simulate_parallel(&mut self.population, &self.goal, gen.ticks, &self.bounds);
                } else {
                    simulate(&mut self.population, &self.goal, gen.ticks, &self.bounds);
                }
                self.phase = Phase::Ranking;
            }

            Phase::Ranking => {
                let population = std::mem::take(&mut self.population);
                let ranked = rank(population, &self.goal);

                let report = GenerationReport {
                    generation: self.generation,
                    goal: self.goal,
                    start: self.start,
                    mutation_chance: self.mutation_chance,
                    ranked: &ranked,
                    elite_size: gen.elite_size,
                };
                observer.on_generation(&report);
                let stats = GenerationStats::from_report(&report);
                log::debug!("{}", stats.summary());
                self.last_stats = Some(stats);

                self.elite = select_elite(ranked, gen.elite_size);
                self.generation += 1;
                self.phase = if self.generation >= gen.generations {
                    Phase::Finished
                } else {
                    Phase::BreedingNext
                };
            }

            Phase::BreedingNext => {
                let best = self.best_fitness().ok_or(EvolveError::InsufficientElite {
                    available: self.elite.len(),
                })?;
                let chance = self.schedule.chance(best, self.bounds.max_distance());

                self.population = breed_population(
                    &self.elite,
                    self.start,
                    self.config.evolution.merge_strategy,
                    chance,
                    gen.population_size,
                    &mut self.rng,
                )?;
                self.elite.clear();
                self.mutation_chance = chance;
                self.phase = Phase::Simulating;
            }

            Phase::Finished => {}
        }

        Ok(self.phase)
    }

    /// Advance until the next generation has been ranked.
    ///
    /// Returns `None` once the run is finished.
    pub fn run_generation<O>(
        &mut self,
        observer: &mut O,
    ) -> Result<Option<GenerationStats>, EvolveError>
    where
        O: GenerationObserver + ?Sized,
    {
        if self.phase == Phase::Finished {
            return Ok(None);
        }

        let target = self.generation + 1;
        while self.generation < target {
            self.advance(observer)?;
        }

        Ok(self.last_stats.clone())
    }

    /// Run every remaining generation, returning the stats of the last one
    pub fn run<O>(&mut self, observer: &mut O) -> Result<Option<GenerationStats>, EvolveError>
    where
        O: GenerationObserver + ?Sized,
    {
        while self.run_generation(observer)?.is_some() {}
        Ok(self.last_stats.clone())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of generations ranked so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current population (empty between ranking and breeding)
    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// Elite of the last ranked generation (empty once it has bred)
    pub fn elite(&self) -> &[RankedAgent] {
        &self.elite
    }

    /// Mutation chance used to breed the current population
    pub fn mutation_chance(&self) -> f32 {
        self.mutation_chance
    }

    /// Best fitness in the current elite
    pub fn best_fitness(&self) -> Option<f32> {
        self.elite.first().map(|r| r.fitness)
    }

    /// Stats of the most recently ranked generation
    pub fn last_stats(&self) -> Option<&GenerationStats> {
        self.last_stats.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
