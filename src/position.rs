//! World coordinates.

use serde::{Deserialize, Serialize};

/// A point in the square world
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    #[inline]
    pub fn distance(&self, other: &Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
