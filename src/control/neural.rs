//! Neural-network driver, the agent the genetic algorithm evolves.
//!
//! Each ray reading feeds one nerve. The network has one hidden layer with the
//! identity activation and a two-neuron `tanh` output layer: linear command
//! first, angular command second.

use rand::Rng;
use rand::rngs::StdRng;

use super::output::ControlOutput;
use super::params::DriverParams;
use crate::error::{EvoError, Result};
use crate::learning::activation::Activation;
use crate::learning::codec;
use crate::learning::evolvable::{Evolvable, Population};
use crate::learning::network::Network;

/// A driver controlled by a neural network.
#[derive(Debug, Clone)]
pub struct NeuralDriver {
    brain: Network,
    maximum_ray_distance: f64,
    fitness: f64,
    active: bool,
    /// Whether [`NeuralDriver::record_crash`] deactivates the driver.
    pub disable_on_crash: bool,
    /// Offset from the spawn point on the two ground axes.
    pub spawn_offset: [f64; 2],
}

impl NeuralDriver {
    /// Creates a driver with a randomly initialized brain.
    pub fn new_random<R: Rng + ?Sized>(params: &DriverParams, rng: &mut R) -> Result<Self> {
        let mut brain = Network::new(params.ray_count(), &params.layer_sizes(), rng)?;
        if let Some(output_layer) = brain.layer_mut(1) {
            output_layer.set_all_activations(Activation::Tanh);
        }

        Ok(Self {
            brain,
            maximum_ray_distance: params.maximum_ray_distance,
            fitness: 0.0,
            active: true,
            disable_on_crash: params.disable_on_crash,
            spawn_offset: [0.0; 2],
        })
    }

    /// Creates a driver whose brain is loaded from a genome code.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Format`] for a malformed code and
    /// [`EvoError::InvalidArgument`] if the genome does not fit the
    /// architecture described by `params`.
    pub fn from_code<R: Rng + ?Sized>(params: &DriverParams, code: &str, rng: &mut R) -> Result<Self> {
        let genome = codec::from_code(code)?;
        let mut driver = Self::new_random(params, rng)?;
        driver.set_genome(&genome)?;
        Ok(driver)
    }

    /// The driver's network.
    pub fn brain(&self) -> &Network {
        &self.brain
    }

    /// The genome encoded as a hex code.
    pub fn genome_code(&self) -> String {
        codec::to_code(&self.brain.all_weights())
    }

    /// Writes one tick of ray readings into the nerves.
    ///
    /// Misses and readings beyond the maximum ray distance are capped at that
    /// distance.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if the number of readings differs
    /// from the number of rays.
    pub fn sense(&mut self, hits: &[Option<f64>]) -> Result<()> {
        if hits.len() != self.brain.input_count() {
            return Err(EvoError::invalid_argument(format!(
                "expected {} ray readings, got {}",
                self.brain.input_count(),
                hits.len()
            )));
        }

        let readings: Vec<f64> = hits
            .iter()
            .map(|hit| {
                hit.map_or(self.maximum_ray_distance, |d| d.min(self.maximum_ray_distance))
            })
            .collect();
        self.brain.set_input_values(&readings)
    }

    /// Runs the brain on the last readings.
    pub fn drive(&mut self) -> ControlOutput {
        let outputs = self.brain.predict();
        ControlOutput::new(outputs[0], outputs[1])
    }

    /// Adds a fitness reward. Negative rewards are ignored.
    pub fn accrue_fitness(&mut self, delta: f64) {
        if delta > 0.0 {
            self.fitness += delta;
        }
    }

    /// Reports a collision. Deactivates the driver if it is configured to.
    pub fn record_crash(&mut self) {
        if self.disable_on_crash {
            self.active = false;
        }
    }

    /// Takes the driver out of the current generation.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Evolvable for NeuralDriver {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn genome(&self) -> Vec<f64> {
        self.brain.all_weights()
    }

    fn set_genome(&mut self, genome: &[f64]) -> Result<()> {
        self.brain.set_all_weights(genome)
    }
}

/// Spawns [`NeuralDriver`]s for the evolution manager.
#[derive(Debug, Clone, Default)]
pub struct DriverPopulation {
    params: DriverParams,
}

impl DriverPopulation {
    /// Creates a population of drivers.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if the parameters fail
    /// [`DriverParams::validate`].
    pub fn new(params: DriverParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The driver parameters.
    pub fn params(&self) -> &DriverParams {
        &self.params
    }
}

impl Population for DriverPopulation {
    type Member = NeuralDriver;

    fn spawn(&mut self, _index: usize, rng: &mut StdRng) -> Result<NeuralDriver> {
        NeuralDriver::new_random(&self.params, rng)
    }

    fn initialize(&mut self, member: &mut NeuralDriver, _index: usize, rng: &mut StdRng) {
        member.disable_on_crash = self.params.disable_on_crash;

        let max_offset = self.params.maximum_spawn_offset.abs();
        if max_offset > 0.0 {
            member.spawn_offset = [
                rng.random_range(-max_offset..=max_offset),
                rng.random_range(-max_offset..=max_offset),
            ];
        }
    }
}
