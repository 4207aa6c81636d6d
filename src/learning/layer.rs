//! Groups of neurons fed by the same input vector.

use ndarray::{Array1, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::neuron::Neuron;
use crate::error::{EvoError, Result};

/// An ordered group of neurons that all read the same input vector.
///
/// Deserialization goes through [`Layer::from_neurons`], so a stored layer
/// whose neurons disagree with its input count is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredLayer")]
pub struct Layer {
    input_count: usize,
    neurons: Vec<Neuron>,
    /// Output buffer, reused by every prediction.
    outputs: Array1<f64>,
}

impl Layer {
    /// Creates a layer of `output_count` randomly initialized neurons.
    ///
    /// # Arguments
    ///
    /// * `input_count` - Length of the shared input vector
    /// * `output_count` - Number of neurons
    /// * `rng` - Random source for the initial weights
    pub fn new_random<R: Rng + ?Sized>(input_count: usize, output_count: usize, rng: &mut R) -> Self {
        let neurons = (0..output_count)
            .map(|_| Neuron::new_random(input_count, rng))
            .collect();

        Self {
            input_count,
            neurons,
            outputs: Array1::zeros(output_count),
        }
    }

    /// Builds a layer from existing neurons.
    ///
    /// Fails if a neuron expects a different number of inputs.
    pub fn from_neurons(input_count: usize, neurons: Vec<Neuron>) -> Result<Self> {
        if let Some(bad) = neurons.iter().find(|n| n.input_count() != input_count) {
            return Err(EvoError::invalid_argument(format!(
                "neuron expects {} inputs but layer provides {}",
                bad.input_count(),
                input_count
            )));
        }

        let outputs = Array1::zeros(neurons.len());
        Ok(Self {
            input_count,
            neurons,
            outputs,
        })
    }

    /// Length of the input vector this layer reads.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of neurons, which is also the output length.
    pub fn output_count(&self) -> usize {
        self.neurons.len()
    }

    /// The neurons of this layer.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Mutable access to the neurons of this layer.
    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Outputs of the last prediction.
    pub fn outputs(&self) -> &Array1<f64> {
        &self.outputs
    }

    /// Recomputes every neuron and returns the cached output vector.
    pub fn predict(&mut self, inputs: ArrayView1<'_, f64>) -> Result<&Array1<f64>> {
        if inputs.len() != self.input_count {
            return Err(EvoError::invalid_argument(format!(
                "layer expects {} input values, got {}",
                self.input_count,
                inputs.len()
            )));
        }

        self.propagate(inputs);
        Ok(&self.outputs)
    }

    /// Same as [`Layer::predict`] for inputs whose length is already known
    /// to match.
    pub(crate) fn propagate(&mut self, inputs: ArrayView1<'_, f64>) {
        for (output, neuron) in self.outputs.iter_mut().zip(self.neurons.iter_mut()) {
            *output = neuron.fire(inputs);
        }
    }

    /// Uses `activation` for every neuron in the layer.
    pub fn set_all_activations(&mut self, activation: Activation) {
        for neuron in &mut self.neurons {
            neuron.set_activation(activation);
        }
    }

    /// Genes contributed by this layer: `(inputs + 1) * outputs`.
    pub fn weight_count(&self) -> usize {
        (self.input_count + 1) * self.neurons.len()
    }
}

/// Serialized form of a [`Layer`]; the output buffer is rebuilt on load.
#[derive(Deserialize)]
struct StoredLayer {
    input_count: usize,
    neurons: Vec<Neuron>,
}

impl TryFrom<StoredLayer> for Layer {
    type Error = EvoError;

    fn try_from(stored: StoredLayer) -> Result<Self> {
        Layer::from_neurons(stored.input_count, stored.neurons)
    }
}
