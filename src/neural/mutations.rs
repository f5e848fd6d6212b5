//! Weight mutations.
//!
//! A mutated weight is replaced by a fresh draw from `[-1, 1)`, not nudged.

use super::layer::Layer;
use super::network::Network;
use crate::random::RandomSource;

impl Layer {
    /// Replace each weight with probability `chance`
    pub fn mutate(&mut self, chance: f32, rng: &mut RandomSource) {
        if chance == 0.0 {
            return;
        }

        for w in self.weights.iter_mut() {
            if rng.weighted_bool(chance) {
                *w = rng.uniform_float(-1.0, 1.0);
            }
        }
    }
}

impl Network {
    /// Mutate the hidden layer, then the output layer
    pub fn mutate(&mut self, chance: f32, rng: &mut RandomSource) {
        self.hidden.mutate(chance, rng);
        self.output.mutate(chance, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_chance_is_noop() {
        let mut rng = RandomSource::from_seed(9);
        let mut net = Network::new(2, 4, &mut rng);
        let original = net.clone();

        net.mutate(0.0, &mut rng);

        assert_eq!(net, original);
    }

    #[test]
    fn test_zero_chance_draws_nothing() {
        let mut rng = RandomSource::from_seed(9);
        let mut probe = rng.clone();
        let mut layer = Layer::zeroed(4, 4);

        layer.mutate(0.0, &mut rng);

        assert_eq!(rng.uniform_float(0.0, 1.0), probe.uniform_float(0.0, 1.0));
    }

    #[test]
    fn test_full_chance_replaces_weights() {
        let mut rng = RandomSource::from_seed(10);
        let mut layer = Layer::zeroed(10, 10);

        layer.mutate(1.0, &mut rng);

        // every zero was replaced by a draw; hitting exactly 0.0 is negligible
        let unchanged = layer.weights().iter().filter(|&&w| w == 0.0).count();
        assert_eq!(unchanged, 0);
        assert!(layer.weights().iter().all(|&w| (-1.0..1.0).contains(&w)));
    }

    #[test]
    fn test_mutation_preserves_shape() {
        let mut rng = RandomSource::from_seed(11);
        let mut net = Network::with_hidden(3, 4, 8, &mut rng);

        for _ in 0..50 {
            net.mutate(0.5, &mut rng);
        }

        assert_eq!(net.hidden().weights().len(), 3 * 8);
        assert_eq!(net.output().weights().len(), 8 * 4);
        assert!(net.is_valid());
    }

    #[test]
    fn test_partial_chance_changes_some() {
        let mut rng = RandomSource::from_seed(12);
        let mut net = Network::new(2, 4, &mut rng);
        let original = net.clone();

        net.mutate(0.5, &mut rng);

        let changed = net
            .hidden()
            .weights()
            .iter()
            .chain(net.output().weights())
            .zip(original.hidden().weights().iter().chain(original.output().weights()))
            .filter(|(a, b)| a != b)
            .count();

        assert!(changed > 0 && changed < net.parameter_count());
    }
}
