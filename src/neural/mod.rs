//! Neural network module for agent controllers.
//!
//! Implements small feed-forward networks with:
//! - Dense sigmoid layers
//! - Weight replacement mutations
//! - Crossover between same-shaped networks

mod crossover;
mod layer;
mod mutations;
mod network;

pub use crossover::MergeStrategy;
pub use layer::{sigmoid, Layer};
pub use network::{Network, DEFAULT_HIDDEN_NEURONS};
