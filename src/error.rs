//! Error types.
//!
//! The evolutionary core works on preconditions; these errors surface the
//! ones a caller can actually get wrong (mismatched parents, too few
//! breeders, bad configuration) instead of corrupting state.

use thiserror::Error;

/// Errors raised while building or combining networks
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NeuralError {
    /// Two parent networks do not share the same layer shapes
    #[error(
        "cannot merge networks of different shapes: {left:?} vs {right:?} (inputs, hidden, outputs)"
    )]
    ShapeMismatch {
        left: (usize, usize, usize),
        right: (usize, usize, usize),
    },

    /// Explicit weights do not fill the layer matrix
    #[error("layer of {neurons}x{inputs} needs {expected} weights, got {found}")]
    WeightCount {
        neurons: usize,
        inputs: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors raised by the generation controller
#[derive(Debug, Error)]
pub enum EvolveError {
    /// Breeding needs two distinct parents
    #[error("breeding needs at least 2 elite agents, {available} available")]
    InsufficientElite { available: usize },

    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
