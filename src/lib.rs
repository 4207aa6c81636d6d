//! # Evodrive - Neuroevolution for Vehicle Controllers
//!
//! A small neuroevolution engine: feedforward neural networks whose weights
//! are evolved by a generational genetic algorithm, plus a finite state
//! machine used by rule-based controllers.
//!
//! The simulation that moves vehicles around is not part of this crate. It
//! writes sensor readings into controllers, reads back two commands per tick
//! (linear and angular speed) and rewards fitness.
//!
//! ## Features
//!
//! - Feedforward networks with selectable activation functions
//! - Genome view of every network (flatten / inflate all weights and biases)
//! - Portable hex genome codes
//! - Generational genetic algorithm (elitism, uniform crossover, mutation,
//!   random immigrants)
//! - Generic finite state machine with guarded transitions
//! - Neural, avoidance and steering controllers
//!
//! ## Core Modules
//!
//! - [`learning::network`] - Neural network implementation
//! - [`learning::evolution`] - Generational genetic algorithm
//! - [`learning::codec`] - Genome codes
//! - [`control::fsm`] - Finite state machines
//! - [`control::neural`] - The evolvable neural driver

/// Neural networks and their evolution.
pub mod learning {
    /// Activation functions for neurons.
    pub mod activation;
    /// Genome codes (bytes and hex text).
    pub mod codec;
    /// Generational genetic algorithm.
    pub mod evolution;
    /// The capability agents provide to be evolved.
    ///
    /// The [`evolvable::Evolvable`] trait is implemented by every agent the
    /// [`evolution::EvolutionManager`] operates on, and
    /// [`evolvable::Population`] creates them.
    pub mod evolvable;
    /// Weighted-sum group sharing one input vector.
    pub mod layer;
    /// Input units set from outside.
    pub mod nerve;
    /// Feedforward networks.
    pub mod network;
    /// Weighted-sum units.
    pub mod neuron;
    /// Evolution parameters.
    pub mod params;
}

/// Controllers producing linear and angular commands from sensor readings.
pub mod control {
    /// Forward/backward obstacle avoidance machine.
    pub mod avoidance;
    /// Generic finite state machine.
    pub mod fsm;
    /// Neural-network driver.
    pub mod neural;
    /// Linear and angular commands.
    pub mod output;
    /// Controller parameters.
    pub mod params;
    /// Rule-based steering.
    pub mod steering;
    /// Roster of vehicles spawned from stored genomes.
    pub mod test_drive;
}

/// Configuration files.
pub mod config;
/// Error types.
pub mod error;
/// Logging setup.
pub mod logging;
