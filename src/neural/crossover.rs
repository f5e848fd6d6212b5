//! Genetic crossover between neural networks.

use super::layer::Layer;
use super::network::Network;
use crate::error::NeuralError;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Strategy for combining two parent networks.
///
/// Each strategy works on the flat row-major weights, one layer at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeStrategy {
    /// Even indices from parent A, odd indices from parent B
    EveryOther,
    /// Parent A before a sampled split index, parent B from it onwards
    #[default]
    SingleSplit,
    /// Each weight from either parent on a coin flip
    RandomChoice,
}

impl MergeStrategy {
    pub const ALL: [MergeStrategy; 3] = [
        MergeStrategy::EveryOther,
        MergeStrategy::SingleSplit,
        MergeStrategy::RandomChoice,
    ];
}

impl Network {
    /// Breed a child from two parents of identical shape.
    ///
    /// The child's layers are filled by `strategy` and then mutated with
    /// `mutation_chance`. Parents are only read.
    pub fn from_parents(
        a: &Network,
        b: &Network,
        strategy: MergeStrategy,
        mutation_chance: f32,
        rng: &mut RandomSource,
    ) -> Result<Self, NeuralError> {
        let mut child = a.crossover(b, strategy, rng)?;
        child.mutate(mutation_chance, rng);
        Ok(child)
    }

    /// Merge with another network of the same shape, without mutation
    pub fn crossover(
        &self,
        other: &Network,
        strategy: MergeStrategy,
        rng: &mut RandomSource,
    ) -> Result<Self, NeuralError> {
        if self.hidden.shape() != other.hidden.shape()
            || self.output.shape() != other.output.shape()
        {
            return Err(NeuralError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let (hidden, output) = match strategy {
            MergeStrategy::EveryOther => (
                blend(&self.hidden, &other.hidden, |i| i % 2 == 0),
                blend(&self.output, &other.output, |i| i % 2 == 0),
            ),
            MergeStrategy::SingleSplit => {
                let n = self.hidden.len();
                let split = rng
                    .normal_float((n / 2) as f32, 1.0)
                    .round()
                    .clamp(0.0, n as f32) as usize;
                let hidden = blend(&self.hidden, &other.hidden, |i| i < split);

                // output split uses a uniform sampler on purpose
                let split = rng.uniform_int(0, self.output.len().saturating_sub(1));
                let output = blend(&self.output, &other.output, |i| i < split);

                (hidden, output)
            }
            MergeStrategy::RandomChoice => {
                let hidden = blend(&self.hidden, &other.hidden, |_| rng.coin_flip());
                let output = blend(&self.output, &other.output, |_| rng.coin_flip());
                (hidden, output)
            }
        };

        Ok(Self { hidden, output })
    }
}

/// Build a new layer taking weight `i` from `a` when `take_a(i)`, else from `b`
fn blend(a: &Layer, b: &Layer, mut take_a: impl FnMut(usize) -> bool) -> Layer {
    let (neurons, inputs) = a.shape();
    let mut child = Layer::zeroed(neurons, inputs);

    for (i, (w, (&wa, &wb))) in child
        .weights
        .iter_mut()
        .zip(a.weights.iter().zip(b.weights.iter()))
        .enumerate()
    {
        *w = if take_a(i) { wa } else { wb };
    }

    child
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_network(value: f32) -> Network {
        let hidden = Layer::from_weights(3, 2, vec![value; 6]).unwrap();
        let output = Layer::from_weights(4, 3, vec![value; 12]).unwrap();
        Network::from_layers(hidden, output).unwrap()
    }

    #[test]
    fn test_every_other() {
        let mut rng = RandomSource::from_seed(1);
        let a = constant_network(1.0);
        let b = constant_network(2.0);

        let child = a.crossover(&b, MergeStrategy::EveryOther, &mut rng).unwrap();

        assert_eq!(child.hidden().weights(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        for (i, &w) in child.output().weights().iter().enumerate() {
            assert_eq!(w, if i % 2 == 0 { 1.0 } else { 2.0 });
        }
    }

    #[test]
    fn test_single_split_is_a_prefix() {
        let mut rng = RandomSource::from_seed(2);
        let a = constant_network(1.0);
        let b = constant_network(2.0);

        for _ in 0..50 {
            let child = a.crossover(&b, MergeStrategy::SingleSplit, &mut rng).unwrap();

            for layer in [child.hidden(), child.output()] {
                let weights = layer.weights();
                let split = weights.iter().take_while(|&&w| w == 1.0).count();
                assert!(weights[split..].iter().all(|&w| w == 2.0));
            }

            // uniform output split never reaches past the last weight
            assert_eq!(*child.output().weights().last().unwrap(), 2.0);
        }
    }

    #[test]
    fn test_random_choice_mixes_parents() {
        let mut rng = RandomSource::from_seed(3);
        let a = constant_network(1.0);
        let b = constant_network(2.0);

        let child = a.crossover(&b, MergeStrategy::RandomChoice, &mut rng).unwrap();
        let weights: Vec<f32> = child
            .hidden()
            .weights()
            .iter()
            .chain(child.output().weights())
            .copied()
            .collect();

        assert!(weights.iter().all(|&w| w == 1.0 || w == 2.0));
        assert!(weights.contains(&1.0));
        assert!(weights.contains(&2.0));
    }

    #[test]
    fn test_self_merge_is_identity() {
        let mut rng = RandomSource::from_seed(4);
        let a = Network::new(2, 4, &mut rng);

        for strategy in MergeStrategy::ALL {
            let child = Network::from_parents(&a, &a, strategy, 0.0, &mut rng).unwrap();
            assert_eq!(child, a, "{strategy:?}");
        }
    }

    #[test]
    fn test_parents_untouched() {
        let mut rng = RandomSource::from_seed(5);
        let a = Network::new(2, 4, &mut rng);
        let b = Network::new(2, 4, &mut rng);
        let (a0, b0) = (a.clone(), b.clone());

        for strategy in MergeStrategy::ALL {
            let child = Network::from_parents(&a, &b, strategy, 0.3, &mut rng).unwrap();
            assert_eq!(child.shape(), a.shape());
            assert_eq!(child.parameter_count(), a.parameter_count());
        }

        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_shape_mismatch() {
        let mut rng = RandomSource::from_seed(6);
        let a = Network::new(2, 4, &mut rng);
        let b = Network::with_hidden(2, 4, 5, &mut rng);

        let err = a.crossover(&b, MergeStrategy::EveryOther, &mut rng).unwrap_err();
        assert_eq!(
            err,
            NeuralError::ShapeMismatch {
                left: (2, 10, 4),
                right: (2, 5, 4)
            }
        );
    }

    #[test]
    fn test_layer_mismatch_rejected() {
        let mut rng = RandomSource::from_seed(7);
        let a = Network::with_hidden(2, 4, 10, &mut rng);
        let mut b = Network::with_hidden(2, 4, 10, &mut rng);
        // hidden layer still matches, output layer does not chain from it
        b.output = Layer::zeroed(4, 3);

        for strategy in MergeStrategy::ALL {
            let result = a.crossover(&b, strategy, &mut rng);
            assert!(
                matches!(result, Err(NeuralError::ShapeMismatch { .. })),
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn test_single_split_samplers() {
        let mut rng = RandomSource::from_seed(8);
        // 50 hidden neurons x 2 inputs = 100 hidden weights, 4 x 50 = 200 output weights
        let a = Network::from_layers(Layer::zeroed(50, 2), Layer::zeroed(4, 50)).unwrap();
        let mut b = a.clone();
        b.hidden = Layer::from_weights(50, 2, vec![1.0; 100]).unwrap();
        b.output = Layer::from_weights(4, 50, vec![1.0; 200]).unwrap();

        let mut hidden_splits = Vec::new();
        let mut output_splits = Vec::new();
        for _ in 0..2000 {
            let child = a.crossover(&b, MergeStrategy::SingleSplit, &mut rng).unwrap();
            let count_a = |w: &[f32]| w.iter().take_while(|&&x| x == 0.0).count();
            hidden_splits.push(count_a(child.hidden().weights()));
            output_splits.push(count_a(child.output().weights()));
        }

        // normal(50, 1): every split within a few deviations of the middle
        assert!(hidden_splits.iter().all(|&s| (44..=56).contains(&s)));
        // uniform over [0, 199]: both ends of the range are reached
        let (lo, hi) = (
            *output_splits.iter().min().unwrap(),
            *output_splits.iter().max().unwrap(),
        );
        assert!(lo < 10, "lowest output split {lo}");
        assert!(hi > 189, "highest output split {hi}");
        assert!(hi <= 199);
    }

    #[test]
    fn test_strategy_yaml_names() {
        let strategy: MergeStrategy = serde_yaml::from_str("RandomChoice").unwrap();
        assert_eq!(strategy, MergeStrategy::RandomChoice);
        assert_eq!(MergeStrategy::default(), MergeStrategy::SingleSplit);
    }
}
