use serde::{Deserialize, Serialize};

use crate::error::{EvoError, Result};

/// Parameters that control the generational loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Members per generation.
    pub total_count: usize,
    /// Members whose genome is bred from the parents. The remaining
    /// `total_count - child_count` keep their random genome.
    pub child_count: usize,
    /// Best members of a generation used as parents. At least 2 and strictly
    /// less than `child_count`.
    pub parent_count: usize,
    /// Probability for each gene to be mutated.
    pub mutation_chance: f64,
    /// Smallest value added to a mutated gene.
    pub minimum_mutation: f64,
    /// Largest value added to a mutated gene.
    pub maximum_mutation: f64,
    /// Age (seconds) after which a generation is replaced even if members are
    /// still active.
    pub maximum_generation_age: f64,
    /// Seed for the random source. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            total_count: 20,
            child_count: 10,
            parent_count: 4,
            mutation_chance: 0.05,
            minimum_mutation: -0.1,
            maximum_mutation: 0.1,
            maximum_generation_age: 20.0,
            seed: None,
        }
    }
}

impl EvolutionParams {
    /// Checks the values that can never be repaired.
    ///
    /// Needs at least two parents and strictly more children than parents,
    /// a mutation chance in `[0, 1]`, finite mutation bounds in order and a
    /// finite positive generation age.
    pub fn validate(&self) -> Result<()> {
        if self.parent_count < 2 || self.parent_count >= self.child_count {
            return Err(EvoError::invalid_argument(format!(
                "expected at least two and less than child_count ({}) parents, got {}",
                self.child_count, self.parent_count
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(EvoError::invalid_argument(format!(
                "mutation_chance must lie in [0, 1], got {}",
                self.mutation_chance
            )));
        }
        if !self.minimum_mutation.is_finite()
            || !self.maximum_mutation.is_finite()
            || self.minimum_mutation > self.maximum_mutation
        {
            return Err(EvoError::invalid_argument(format!(
                "mutation bounds must be finite with minimum_mutation ({}) not above maximum_mutation ({})",
                self.minimum_mutation, self.maximum_mutation
            )));
        }
        if !self.maximum_generation_age.is_finite() || self.maximum_generation_age <= 0.0 {
            return Err(EvoError::invalid_argument(format!(
                "maximum_generation_age must be finite and positive, got {}",
                self.maximum_generation_age
            )));
        }
        Ok(())
    }
}
