//! Agent structure and movement.

use crate::error::NeuralError;
use crate::neural::{MergeStrategy, Network, DEFAULT_HIDDEN_NEURONS};
use crate::position::Position;
use crate::random::RandomSource;

/// Sensor inputs: normalised x and y displacement from the goal
pub const NUM_SENSORS: usize = 2;

/// Control outputs: x-delta, y-delta, x-direction flag, y-direction flag
pub const NUM_CONTROLS: usize = 4;

/// Direction flags above this threshold move in the positive direction
const DIRECTION_THRESHOLD: f32 = 0.5;

/// Square world limits used for clamping movement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Edge length of the square world
    pub edge_length: f32,
    /// Size of the drawn agent; positions stay at least this far from the far edges
    pub object_size: f32,
}

impl Bounds {
    pub fn new(edge_length: f32) -> Self {
        Self {
            edge_length,
            object_size: 0.0,
        }
    }

    pub fn with_object_size(mut self, object_size: f32) -> Self {
        self.object_size = object_size;
        self
    }

    /// Largest reachable coordinate on either axis
    #[inline]
    pub fn limit(&self) -> f32 {
        (self.edge_length - self.object_size).max(0.0)
    }

    /// Clamp both axes into `[0, limit]`
    #[inline]
    pub fn clamp(&self, x: f32, y: f32) -> Position {
        let limit = self.limit();
        Position::new(x.clamp(0.0, limit), y.clamp(0.0, limit))
    }

    pub fn contains(&self, pos: &Position) -> bool {
        let limit = self.limit();
        (0.0..=limit).contains(&pos.x) && (0.0..=limit).contains(&pos.y)
    }

    /// Largest distance between two reachable positions (the diagonal)
    pub fn max_distance(&self) -> f32 {
        self.limit() * std::f32::consts::SQRT_2
    }

    /// Uniformly random reachable position
    pub fn random_position(&self, rng: &mut RandomSource) -> Position {
        let limit = self.limit();
        Position::new(rng.uniform_float(0.0, limit), rng.uniform_float(0.0, limit))
    }
}

/// One candidate controller: a network and the path it has travelled
#[derive(Clone, Debug)]
pub struct Agent {
    positions: Vec<Position>,
    network: Network,
    num_sensors: usize,
    num_controls: usize,
}

impl Agent {
    /// Create an agent with a freshly initialised network
    pub fn new(seed: Position, num_sensors: usize, rng: &mut RandomSource) -> Self {
        Self::with_hidden(seed, num_sensors, DEFAULT_HIDDEN_NEURONS, rng)
    }

    /// Create an agent whose network has `hidden_neurons` hidden neurons
    pub fn with_hidden(
        seed: Position,
        num_sensors: usize,
        hidden_neurons: usize,
        rng: &mut RandomSource,
    ) -> Self {
        Self {
            positions: vec![seed],
            network: Network::with_hidden(num_sensors, NUM_CONTROLS, hidden_neurons, rng),
            num_sensors,
            num_controls: NUM_CONTROLS,
        }
    }

    /// Breed an agent from two parents
    pub fn from_parents(
        seed: Position,
        a: &Agent,
        b: &Agent,
        strategy: MergeStrategy,
        mutation_chance: f32,
        rng: &mut RandomSource,
    ) -> Result<Self, NeuralError> {
        let network = Network::from_parents(&a.network, &b.network, strategy, mutation_chance, rng)?;

        Ok(Self {
            positions: vec![seed],
            network,
            num_sensors: a.num_sensors,
            num_controls: a.num_controls,
        })
    }

    /// Ask the network for controls and move accordingly
    #[inline]
    pub fn move_agent(&mut self, sensors: &[f32], bounds: &Bounds) -> Position {
        let controls = self.network.predict(sensors);
        self.apply_controls(&controls, bounds)
    }

    /// Turn `[dx, dy, dir_x, dir_y]` into the next clamped position and record it.
    ///
    /// Panics unless exactly four controls are supplied.
    pub fn apply_controls(&mut self, controls: &[f32], bounds: &Bounds) -> Position {
        assert_eq!(controls.len(), NUM_CONTROLS, "agent expects {NUM_CONTROLS} controls");

        let last = self.last_position();
        let (dx, dy, dir_x, dir_y) = (controls[0], controls[1], controls[2], controls[3]);

        let x = if dir_x > DIRECTION_THRESHOLD { last.x + dx } else { last.x - dx };
        let y = if dir_y > DIRECTION_THRESHOLD { last.y + dy } else { last.y - dy };

        let next = bounds.clamp(x, y);
        self.positions.push(next);
        next
    }

    /// Normalised displacement from the goal, the agent's sensor reading
    #[inline]
    pub fn sensors(&self, goal: &Position, edge_length: f32) -> [f32; NUM_SENSORS] {
        let last = self.last_position();
        [
            (last.x - goal.x) / edge_length,
            (last.y - goal.y) / edge_length,
        ]
    }

    /// Distance from the final position to `goal` (lower is better)
    #[inline]
    pub fn fitness(&self, goal: &Position) -> f32 {
        self.last_position().distance(goal)
    }

    /// Full trajectory, seed position first
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn last_position(&self) -> Position {
        // never empty: constructors always push the seed
        self.positions[self.positions.len() - 1]
    }

    pub fn ticks_elapsed(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn num_sensors(&self) -> usize {
        self.num_sensors
    }

    pub fn num_controls(&self) -> usize {
        self.num_controls
    }

    pub(crate) fn reserve_ticks(&mut self, ticks: usize) {
        self.positions.reserve(ticks);
    }
}
