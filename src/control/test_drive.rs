//! A roster of hand-picked vehicles, outside of any evolution run.
//!
//! Neural drivers are spawned from stored genomes; a genome that does not fit
//! the driver architecture is reported and the vehicle is discarded instead of
//! aborting the roster.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info};

use super::neural::NeuralDriver;
use super::params::{DriverParams, SteeringParams};
use super::steering::SteeringController;
use crate::error::Result;
use crate::learning::codec;
use crate::learning::evolvable::Evolvable;

/// Either kind of controller the roster can hold.
#[derive(Debug)]
pub enum Vehicle {
    /// A driver evolved by the genetic algorithm.
    Neural(NeuralDriver),
    /// The rule-based steering controller.
    Steering(SteeringController),
}

/// A roster of vehicles and the one currently followed.
#[derive(Debug)]
pub struct TestDrive {
    driver_params: DriverParams,
    steering_params: SteeringParams,
    vehicles: Vec<Vehicle>,
    /// Index of the followed vehicle; `None` follows nothing in particular.
    follow: Option<usize>,
    rng: StdRng,
}

impl TestDrive {
    /// Creates an empty roster.
    ///
    /// # Arguments
    ///
    /// * `driver_params` - Architecture of spawned neural drivers
    /// * `steering_params` - Parameters of spawned steering controllers
    /// * `seed` - Seed for spawn offsets and brain initialization
    pub fn new(driver_params: DriverParams, steering_params: SteeringParams, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            driver_params,
            steering_params,
            vehicles: Vec::new(),
            follow: None,
            rng,
        }
    }

    /// The vehicles, in spawn order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Mutable access to the vehicles.
    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    /// Index of the followed vehicle.
    pub fn follow(&self) -> Option<usize> {
        self.follow
    }

    /// Spawns a neural driver from a genome.
    ///
    /// A genome that does not fit the architecture is logged and the driver is
    /// discarded; the error is returned to the caller.
    pub fn spawn_neural(&mut self, genome: &[f64]) -> Result<usize> {
        let mut driver = NeuralDriver::new_random(&self.driver_params, &mut self.rng)?;
        if let Err(e) = driver.set_genome(genome) {
            error!(error = %e, "the genome is invalid, discarding the driver");
            return Err(e);
        }

        driver.spawn_offset = self.random_spawn_offset();
        self.vehicles.push(Vehicle::Neural(driver));
        info!(index = self.vehicles.len() - 1, "spawned neural driver");
        Ok(self.vehicles.len() - 1)
    }

    /// Spawns a neural driver from a genome code.
    pub fn spawn_neural_from_code(&mut self, code: &str) -> Result<usize> {
        let genome = codec::from_code(code).inspect_err(|e| {
            error!(error = %e, "the genome code is malformed, discarding the driver");
        })?;
        self.spawn_neural(&genome)
    }

    /// Spawns a rule-based steering controller.
    pub fn spawn_steering(&mut self) -> Result<usize> {
        let controller = SteeringController::new(self.steering_params.clone())?;
        self.vehicles.push(Vehicle::Steering(controller));
        info!(index = self.vehicles.len() - 1, "spawned steering controller");
        Ok(self.vehicles.len() - 1)
    }

    /// Removes every vehicle and stops following.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.follow = None;
    }

    /// Follows the next vehicle. After the last vehicle, follows nothing; the
    /// call after that starts over at the first vehicle.
    pub fn switch_follow(&mut self) -> Option<usize> {
        self.follow = match self.follow {
            None if !self.vehicles.is_empty() => Some(0),
            Some(index) if index + 1 < self.vehicles.len() => Some(index + 1),
            _ => None,
        };
        self.follow
    }

    fn random_spawn_offset(&mut self) -> [f64; 2] {
        let max_offset = self.driver_params.maximum_spawn_offset.abs();
        if max_offset > 0.0 {
            [
                self.rng.random_range(-max_offset..=max_offset),
                self.rng.random_range(-max_offset..=max_offset),
            ]
        } else {
            [0.0; 2]
        }
    }
}
