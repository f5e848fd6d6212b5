//! Two-layer feed-forward network and forward propagation.

use super::layer::Layer;
use crate::random::RandomSource;

/// Default width of the hidden layer
pub const DEFAULT_HIDDEN_NEURONS: usize = 10;

/// Feed-forward network with one hidden and one output layer
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub(crate) hidden: Layer,
    pub(crate) output: Layer,
}

impl Network {
    /// Create a randomly initialised network with the default hidden width
    pub fn new(num_inputs: usize, num_outputs: usize, rng: &mut RandomSource) -> Self {
        Self::with_hidden(num_inputs, num_outputs, DEFAULT_HIDDEN_NEURONS, rng)
    }

    /// Create a randomly initialised network with `num_neurons` hidden neurons
    pub fn with_hidden(
        num_inputs: usize,
        num_outputs: usize,
        num_neurons: usize,
        rng: &mut RandomSource,
    ) -> Self {
        let hidden = Layer::new(num_neurons, num_inputs, rng);
        let output = Layer::new(num_outputs, num_neurons, rng);

        Self { hidden, output }
    }

    /// Assemble a network from prebuilt layers.
    ///
    /// Returns `None` when the layers do not chain (`hidden` outputs must
    /// feed `output` inputs).
    pub fn from_layers(hidden: Layer, output: Layer) -> Option<Self> {
        if hidden.num_neurons() != output.num_inputs() {
            return None;
        }

        Some(Self { hidden, output })
    }

    /// Forward pass: hidden layer, then output layer
    #[inline]
    pub fn predict(&self, inputs: &[f32]) -> Vec<f32> {
        let hidden_out = self.hidden.calculate_outputs(inputs);
        self.output.calculate_outputs(&hidden_out)
    }

    /// Number of input values
    pub fn num_inputs(&self) -> usize {
        self.hidden.num_inputs()
    }

    /// Width of the hidden layer
    pub fn num_neurons(&self) -> usize {
        self.hidden.num_neurons()
    }

    /// Number of output values
    pub fn num_outputs(&self) -> usize {
        self.output.num_neurons()
    }

    pub fn hidden(&self) -> &Layer {
        &self.hidden
    }

    pub fn output(&self) -> &Layer {
        &self.output
    }

    /// `(num_inputs, num_neurons, num_outputs)`
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.num_inputs(), self.num_neurons(), self.num_outputs())
    }

    /// Total number of weights
    pub fn parameter_count(&self) -> usize {
        self.hidden.len() + self.output.len()
    }

    /// Check if network is valid (no NaN/Inf)
    pub fn is_valid(&self) -> bool {
        self.hidden.is_valid() && self.output.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_shape() {
        let mut rng = RandomSource::from_seed(1);
        let net = Network::new(2, 4, &mut rng);

        assert_eq!(net.shape(), (2, 10, 4));
        assert_eq!(net.num_inputs(), 2);
        assert_eq!(net.num_neurons(), 10);
        assert_eq!(net.num_outputs(), 4);
        assert_eq!(net.hidden().shape(), (10, 2));
        assert_eq!(net.output().shape(), (4, 10));
        assert_eq!(net.parameter_count(), 2 * 10 + 10 * 4);
        assert!(net.is_valid());
    }

    #[test]
    fn test_forward_pass() {
        let mut rng = RandomSource::from_seed(2);
        let net = Network::with_hidden(3, 5, 6, &mut rng);
        let outputs = net.predict(&[0.5, -0.5, 0.25]);

        assert_eq!(outputs.len(), 5);
        // sigmoid outputs should be in (0, 1)
        assert!(outputs.iter().all(|&x| x > 0.0 && x < 1.0));
    }

    #[test]
    fn test_predict_is_deterministic() {
        let mut rng = RandomSource::from_seed(3);
        let net = Network::new(2, 4, &mut rng);

        assert_eq!(net.predict(&[0.1, 0.2]), net.predict(&[0.1, 0.2]));
    }

    #[test]
    fn test_from_layers() {
        let hidden = Layer::from_weights(1, 2, vec![0.0, 0.0]).unwrap();
        let output = Layer::from_weights(1, 1, vec![0.0]).unwrap();
        let net = Network::from_layers(hidden, output).unwrap();

        assert_eq!(net.shape(), (2, 1, 1));
        assert_eq!(net.predict(&[3.0, 4.0]), vec![0.5]);

        let bad = Network::from_layers(Layer::zeroed(3, 2), Layer::zeroed(1, 2));
        assert!(bad.is_none());
    }
}
