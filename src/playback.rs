//! Sampled trajectory recordings for visualisation front-ends.
//!
//! A renderer replays a [`Playback`] tick by tick with [`Playback::frame`].
//! Nothing here draws; it only copies what the controller exposes.

use crate::observer::{GenerationObserver, GenerationReport};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path of one ranked agent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    /// Rank within its generation (0 = best)
    pub rank: usize,
    pub fitness: f32,
    pub positions: Vec<Position>,
}

/// Trails of one generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    pub generation: usize,
    pub goal: Position,
    pub start: Position,
    pub trails: Vec<Trail>,
}

impl Playback {
    /// Capture the elite (or every agent) of a report
    pub fn capture(report: &GenerationReport<'_>, elite_only: bool) -> Self {
        let agents = if elite_only {
            report.elite()
        } else {
            report.ranked
        };

        let trails = agents
            .iter()
            .enumerate()
            .map(|(rank, ranked)| Trail {
                rank,
                fitness: ranked.fitness,
                positions: ranked.agent.positions().to_vec(),
            })
            .collect();

        Self {
            generation: report.generation,
            goal: report.goal,
            start: report.start,
            trails,
        }
    }

    /// Number of ticks covered by the longest trail
    pub fn ticks(&self) -> usize {
        self.trails
            .iter()
            .map(|t| t.positions.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    /// Position of every trail at `tick`; trails that ended stay at their last point
    pub fn frame(&self, tick: usize) -> Vec<Position> {
        self.trails
            .iter()
            .filter_map(|t| t.positions.get(tick).or_else(|| t.positions.last()))
            .copied()
            .collect()
    }
}

/// Records a playback every `interval` generations
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlaybackRecorder {
    pub interval: usize,
    pub elite_only: bool,
    pub playbacks: Vec<Playback>,
}

impl PlaybackRecorder {
    pub fn new(interval: usize, elite_only: bool) -> Self {
        Self {
            interval,
            elite_only,
            playbacks: Vec::new(),
        }
    }

    /// Whether generation `generation` is sampled
    pub fn should_record(&self, generation: usize) -> bool {
        self.interval > 0 && generation % self.interval == 0
    }

    pub fn latest(&self) -> Option<&Playback> {
        self.playbacks.last()
    }

    /// Save all playbacks to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string(&self.playbacks)?;
        std::fs::write(path, json)
    }
}

impl GenerationObserver for PlaybackRecorder {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        if self.should_record(report.generation) {
            log::debug!("Recording playback for generation {}", report.generation);
            self.playbacks.push(Playback::capture(report, self.elite_only));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, Bounds, NUM_SENSORS};
    use crate::evolution::{rank, simulate, RankedAgent};
    use crate::random::RandomSource;
    use tempfile::tempdir;

    fn ranked_agents(count: usize, ticks: usize) -> Vec<RankedAgent> {
        let mut rng = RandomSource::from_seed(1);
        let goal = Position::new(10.0, 10.0);
        let mut agents: Vec<Agent> = (0..count)
            .map(|_| Agent::new(Position::new(50.0, 50.0), NUM_SENSORS, &mut rng))
            .collect();
        simulate(&mut agents, &goal, ticks, &Bounds::new(100.0));
        rank(agents, &goal)
    }

    fn report(ranked: &[RankedAgent], generation: usize) -> GenerationReport<'_> {
        GenerationReport {
            generation,
            goal: Position::new(10.0, 10.0),
            start: Position::new(50.0, 50.0),
            mutation_chance: 0.0,
            ranked,
            elite_size: 2,
        }
    }

    #[test]
    fn test_capture_elite_only() {
        let ranked = ranked_agents(5, 8);
        let playback = Playback::capture(&report(&ranked, 0), true);

        assert_eq!(playback.trails.len(), 2);
        assert_eq!(playback.trails[0].fitness, ranked[0].fitness);
        assert_eq!(playback.ticks(), 8);

        let all = Playback::capture(&report(&ranked, 0), false);
        assert_eq!(all.trails.len(), 5);
    }

    #[test]
    fn test_frames() {
        let ranked = ranked_agents(3, 4);
        let playback = Playback::capture(&report(&ranked, 0), false);

        assert_eq!(playback.frame(0), vec![Position::new(50.0, 50.0); 3]);
        assert_eq!(playback.frame(4), playback.frame(100));
        assert_eq!(playback.frame(4)[0], *ranked[0].agent.positions().last().unwrap());
    }

    #[test]
    fn test_recorder_interval() {
        let ranked = ranked_agents(3, 2);
        let mut recorder = PlaybackRecorder::new(3, true);

        for generation in 0..7 {
            recorder.on_generation(&report(&ranked, generation));
        }

        let sampled: Vec<usize> = recorder.playbacks.iter().map(|p| p.generation).collect();
        assert_eq!(sampled, vec![0, 3, 6]);
        assert_eq!(recorder.latest().unwrap().generation, 6);
    }

    #[test]
    fn test_disabled_recorder() {
        let ranked = ranked_agents(2, 1);
        let mut recorder = PlaybackRecorder::new(0, true);
        recorder.on_generation(&report(&ranked, 0));

        assert!(recorder.playbacks.is_empty());
    }

    #[test]
    fn test_recorder_save() {
        let ranked = ranked_agents(3, 5);
        let mut recorder = PlaybackRecorder::new(1, false);
        recorder.on_generation(&report(&ranked, 0));

        let dir = tempdir().unwrap();
        let path = dir.path().join("playback.json");
        recorder.save(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let loaded: Vec<Playback> = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, recorder.playbacks);
    }
}
