//! Feedforward networks and their genome view.
//!
//! A [`Network`] is a row of input [`Nerve`]s followed by an ordered chain of
//! [`Layer`]s. Layer `i + 1` reads exactly the outputs of layer `i`; layer 0
//! reads the nerves.
//!
//! The genome of a network is every weight and bias flattened in a fixed
//! order: layer by layer, neuron by neuron, each neuron's weights followed by
//! its bias. Its length only depends on the architecture:
//! `Σ (inputs_to_layer + 1) * outputs_of_layer`.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::layer::Layer;
use super::nerve::Nerve;
use crate::error::{EvoError, Result};

/// Flat vector of all weights and biases of one network architecture.
pub type Genome = Vec<f64>;

/// A feedforward neural network.
///
/// Deserialization goes through [`Network::from_layers`], so the layer chain
/// of a stored network is checked the same way as a freshly assembled one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredNetwork")]
pub struct Network {
    nerves: Vec<Nerve>,
    layers: Vec<Layer>,
    /// Nerve values gathered before each prediction.
    input_values: Array1<f64>,
}

impl Network {
    /// Creates a network with random weights.
    ///
    /// # Arguments
    ///
    /// * `input_count` - Number of input nerves
    /// * `layer_sizes` - Neuron count of each layer, input side first
    /// * `rng` - Random source for the initial weights
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if `layer_sizes` is empty.
    pub fn new<R: Rng + ?Sized>(input_count: usize, layer_sizes: &[usize], rng: &mut R) -> Result<Self> {
        if layer_sizes.is_empty() {
            return Err(EvoError::invalid_argument(
                "at least one layer has to exist for a network",
            ));
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut layer_inputs = input_count;
        for &size in layer_sizes {
            layers.push(Layer::new_random(layer_inputs, size, rng));
            layer_inputs = size;
        }

        Ok(Self {
            nerves: vec![Nerve::default(); input_count],
            layers,
            input_values: Array1::zeros(input_count),
        })
    }

    /// Assembles a network from prebuilt layers.
    ///
    /// Fails if there are no layers or if a layer's input count does not match
    /// the output count of the layer (or nerve row) before it.
    pub fn from_layers(input_count: usize, layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(EvoError::invalid_argument(
                "at least one layer has to exist for a network",
            ));
        }

        let mut expected = input_count;
        for (index, layer) in layers.iter().enumerate() {
            if layer.input_count() != expected {
                return Err(EvoError::invalid_argument(format!(
                    "layer {} reads {} inputs but is fed {}",
                    index,
                    layer.input_count(),
                    expected
                )));
            }
            expected = layer.output_count();
        }

        Ok(Self {
            nerves: vec![Nerve::default(); input_count],
            layers,
            input_values: Array1::zeros(input_count),
        })
    }

    /// Number of input nerves.
    pub fn input_count(&self) -> usize {
        self.nerves.len()
    }

    /// Number of outputs of the last layer.
    pub fn output_count(&self) -> usize {
        self.output_layer().output_count()
    }

    /// The input nerves.
    pub fn nerves(&self) -> &[Nerve] {
        &self.nerves
    }

    /// The layers, input side first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to a single layer.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// The last layer.
    pub fn output_layer(&self) -> &Layer {
        // Construction rejects empty layer lists.
        &self.layers[self.layers.len() - 1]
    }

    /// Outputs of the last prediction.
    pub fn predicted_values(&self) -> &Array1<f64> {
        self.output_layer().outputs()
    }

    /// Writes one value per nerve.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if `values` does not have one
    /// element per nerve. No nerve is touched in that case.
    pub fn set_input_values(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.nerves.len() {
            return Err(EvoError::invalid_argument(format!(
                "amount of input values ({}) does not match amount of nerves ({})",
                values.len(),
                self.nerves.len()
            )));
        }

        for (nerve, &value) in self.nerves.iter_mut().zip(values) {
            nerve.set_value(value);
        }
        Ok(())
    }

    /// Writes a single nerve.
    pub fn set_input_value(&mut self, index: usize, value: f64) -> Result<()> {
        let count = self.nerves.len();
        let nerve = self.nerves.get_mut(index).ok_or_else(|| {
            EvoError::out_of_range(format!("nerve index {} out of {}", index, count))
        })?;
        nerve.set_value(value);
        Ok(())
    }

    /// Runs every layer in order and returns the output of the last one.
    pub fn predict(&mut self) -> &Array1<f64> {
        for (slot, nerve) in self.input_values.iter_mut().zip(&self.nerves) {
            *slot = nerve.predict();
        }

        if let Some((first, rest)) = self.layers.split_first_mut() {
            first.propagate(self.input_values.view());
            let mut previous = first;
            for layer in rest {
                layer.propagate(previous.outputs().view());
                previous = layer;
            }
        }

        self.predicted_values()
    }

    /// [`Network::set_input_values`] followed by [`Network::predict`].
    pub fn predict_with(&mut self, values: &[f64]) -> Result<&Array1<f64>> {
        self.set_input_values(values)?;
        Ok(self.predict())
    }

    /// Length of this network's genome.
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(Layer::weight_count).sum()
    }

    /// Flattens all weights and biases into a genome.
    pub fn all_weights(&self) -> Genome {
        let mut genome = Vec::with_capacity(self.weight_count());
        for layer in &self.layers {
            for neuron in layer.neurons() {
                neuron.write_genes(&mut genome);
            }
        }
        genome
    }

    /// Loads all weights and biases from a genome.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if the genome length differs from
    /// [`Network::weight_count`]. The network is unchanged in that case.
    pub fn set_all_weights(&mut self, genome: &[f64]) -> Result<()> {
        let expected = self.weight_count();
        if genome.len() != expected {
            return Err(EvoError::invalid_argument(format!(
                "amount of weights supplied ({}) does not match amount expected ({})",
                genome.len(),
                expected
            )));
        }

        let mut offset = 0;
        for layer in &mut self.layers {
            for neuron in layer.neurons_mut() {
                let count = neuron.gene_count();
                neuron.read_genes(&genome[offset..offset + count]);
                offset += count;
            }
        }
        Ok(())
    }

    /// Uses `activation` for every neuron of every layer.
    pub fn set_all_activations(&mut self, activation: Activation) {
        for layer in &mut self.layers {
            layer.set_all_activations(activation);
        }
    }
}

/// Serialized form of a [`Network`]; the input buffer is rebuilt on load.
#[derive(Deserialize)]
struct StoredNetwork {
    nerves: Vec<Nerve>,
    layers: Vec<Layer>,
}

impl TryFrom<StoredNetwork> for Network {
    type Error = EvoError;

    fn try_from(stored: StoredNetwork) -> Result<Self> {
        let mut network = Network::from_layers(stored.nerves.len(), stored.layers)?;
        network.nerves = stored.nerves;
        Ok(network)
    }
}
