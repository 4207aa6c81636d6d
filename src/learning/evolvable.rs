//! The capability the genetic algorithm needs from an agent.
//!
//! [`Evolvable`] is the only coupling between the evolution manager and a
//! concrete controller. [`Population`] is the registry the manager is handed
//! to create members, together with the per-member initialization hook.

use rand::rngs::StdRng;
use std::cmp::Ordering;

use crate::error::Result;

/// An agent whose behavior is determined by a genome.
pub trait Evolvable {
    /// Accumulated fitness. Never negative, never decreases within a
    /// generation.
    fn fitness(&self) -> f64;

    /// Whether the agent is still taking part in the current generation.
    fn is_active(&self) -> bool;

    /// A copy of the agent's genome.
    fn genome(&self) -> Vec<f64>;

    /// Replaces the agent's genome.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::EvoError::InvalidArgument`] if the length
    /// does not match the agent's architecture. The previous genome is kept.
    fn set_genome(&mut self, genome: &[f64]) -> Result<()>;
}

/// Orders two evolvables fittest first.
pub fn by_descending_fitness<E: Evolvable + ?Sized>(a: &E, b: &E) -> Ordering {
    b.fitness().total_cmp(&a.fitness())
}

/// Creates the members of each new generation.
pub trait Population {
    /// The agent type being evolved.
    type Member: Evolvable;

    /// Creates a brand new member with a freshly randomized genome.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the member within its generation
    /// * `rng` - The manager's random source
    fn spawn(&mut self, index: usize, rng: &mut StdRng) -> Result<Self::Member>;

    /// Customizes a freshly spawned member before it joins the generation.
    fn initialize(&mut self, _member: &mut Self::Member, _index: usize, _rng: &mut StdRng) {}
}
