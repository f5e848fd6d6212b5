//! Fully connected sigmoid layer.

use crate::error::NeuralError;
use crate::random::RandomSource;
use ndarray::{Array2, ArrayView1};

/// Logistic activation, always in `(0, 1)` for finite input
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// A fully connected layer.
///
/// Weights form a row-major `num_neurons x num_inputs` matrix: row `n` holds
/// the input weights of neuron `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub(crate) weights: Array2<f32>,
}

impl Layer {
    /// Create a layer with weights drawn uniformly from `[-1, 1)`
    pub fn new(num_neurons: usize, num_inputs: usize, rng: &mut RandomSource) -> Self {
        let weights =
            Array2::from_shape_fn((num_neurons, num_inputs), |_| rng.uniform_float(-1.0, 1.0));
        Self { weights }
    }

    /// Create a layer with every weight set to zero
    pub fn zeroed(num_neurons: usize, num_inputs: usize) -> Self {
        Self {
            weights: Array2::zeros((num_neurons, num_inputs)),
        }
    }

    /// Create a layer from explicit row-major weights
    pub fn from_weights(
        num_neurons: usize,
        num_inputs: usize,
        weights: Vec<f32>,
    ) -> Result<Self, NeuralError> {
        let found = weights.len();
        let weights = Array2::from_shape_vec((num_neurons, num_inputs), weights).map_err(|_| {
            NeuralError::WeightCount {
                neurons: num_neurons,
                inputs: num_inputs,
                expected: num_neurons * num_inputs,
                found,
            }
        })?;
        Ok(Self { weights })
    }

    #[inline]
    pub fn num_neurons(&self) -> usize {
        self.weights.nrows()
    }

    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.weights.ncols()
    }

    /// `(num_neurons, num_inputs)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.weights.dim()
    }

    /// Number of weights (`num_neurons * num_inputs`)
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights in row-major order
    pub fn weights(&self) -> &[f32] {
        self.weights.as_slice().unwrap_or_default()
    }

    /// Output of every neuron for the given inputs.
    ///
    /// Panics if `inputs.len() != num_inputs`.
    pub fn calculate_outputs(&self, inputs: &[f32]) -> Vec<f32> {
        assert_eq!(
            inputs.len(),
            self.num_inputs(),
            "layer expects {} inputs",
            self.num_inputs()
        );

        let mut outputs = self.weights.dot(&ArrayView1::from(inputs));
        outputs.mapv_inplace(sigmoid);
        outputs.to_vec()
    }

    /// Check that every weight is finite
    pub fn is_valid(&self) -> bool {
        self.weights.iter().all(|w| w.is_finite())
    }
}
