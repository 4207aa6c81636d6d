//! Weighted-sum units.

use ndarray::{Array1, ArrayView1, aview1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use crate::error::{EvoError, Result};

/// A single neuron: `activation(bias + Σ inputs[i] * weights[i])`.
///
/// A neuron does not own its inputs. The layer that holds it hands in the
/// shared input vector on every prediction, and that vector must always have
/// exactly as many elements as the neuron has weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    /// One weight per input.
    weights: Array1<f64>,
    /// Added to the weighted sum before activation.
    bias: f64,
    /// Function applied to the weighted sum.
    activation: Activation,
    /// Result of the last prediction.
    predicted_value: f64,
}

impl Neuron {
    /// Creates a neuron with weights and bias drawn uniformly from `[-1, 1)`.
    ///
    /// # Arguments
    ///
    /// * `input_count` - Number of inputs the neuron will be fed
    /// * `rng` - Random source for the initial values
    pub fn new_random<R: Rng + ?Sized>(input_count: usize, rng: &mut R) -> Self {
        let weights = Array1::from_shape_fn(input_count, |_| random_starting_value(rng));
        let bias = random_starting_value(rng);

        Self {
            weights,
            bias,
            activation: Activation::Identity,
            predicted_value: 0.0,
        }
    }

    /// Creates a neuron from explicit weights and bias.
    pub fn from_parts(weights: Vec<f64>, bias: f64, activation: Activation) -> Self {
        Self {
            weights: Array1::from_vec(weights),
            bias,
            activation,
            predicted_value: 0.0,
        }
    }

    /// Number of inputs this neuron expects.
    #[inline]
    pub fn input_count(&self) -> usize {
        self.weights.len()
    }

    /// The input weights.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Replaces the weights by copying `weights`.
    ///
    /// Fails without touching the neuron if the length differs from the
    /// current input count.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        self.check_input_count(weights.len())?;
        self.weights.assign(&aview1(weights));
        Ok(())
    }

    /// The bias.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Sets the bias.
    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// The activation function.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Sets the activation function.
    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    /// The value computed by the last call to [`Neuron::predict`].
    pub fn predicted_value(&self) -> f64 {
        self.predicted_value
    }

    /// Computes, stores and returns a new predicted value.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Current values of the input units, one per weight
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if `inputs` has the wrong length.
    pub fn predict(&mut self, inputs: ArrayView1<'_, f64>) -> Result<f64> {
        self.check_input_count(inputs.len())?;
        Ok(self.fire(inputs))
    }

    /// Predicts without checking the input length. Callers guarantee it.
    #[inline]
    pub(crate) fn fire(&mut self, inputs: ArrayView1<'_, f64>) -> f64 {
        let sum = self.bias + self.weights.dot(&inputs);
        self.predicted_value = self.activation.apply(sum);
        self.predicted_value
    }

    /// Number of genes this neuron contributes to a genome.
    #[inline]
    pub(crate) fn gene_count(&self) -> usize {
        self.weights.len() + 1
    }

    /// Appends the weights followed by the bias to `genome`.
    pub(crate) fn write_genes(&self, genome: &mut Vec<f64>) {
        genome.extend(self.weights.iter().copied());
        genome.push(self.bias);
    }

    /// Loads weights then bias from `genes`, which must hold exactly
    /// [`Neuron::gene_count`] values.
    pub(crate) fn read_genes(&mut self, genes: &[f64]) {
        let (weights, bias) = genes.split_at(self.weights.len());
        self.weights.assign(&aview1(weights));
        self.bias = bias[0];
    }

    fn check_input_count(&self, count: usize) -> Result<()> {
        if count != self.input_count() {
            return Err(EvoError::invalid_argument(format!(
                "expected {} input values, got {}",
                self.input_count(),
                count
            )));
        }
        Ok(())
    }
}

fn random_starting_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(-1.0..1.0)
}
