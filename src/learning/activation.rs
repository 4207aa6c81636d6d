//! Activation functions applied to a neuron's weighted sum.

use serde::{Deserialize, Serialize};

/// A pure scalar function applied to the weighted input sum of a neuron.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// f(x) = x
    #[default]
    Identity,
    /// f(x) = 1 if x > 0, otherwise -1
    Threshold0,
    /// f(x) = tanh(x)
    Tanh,
}

impl Activation {
    /// Applies the function to `sum`.
    #[inline]
    pub fn apply(self, sum: f64) -> f64 {
        match self {
            Activation::Identity => sum,
            Activation::Threshold0 => {
                if sum > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Activation::Tanh => sum.tanh(),
        }
    }
}
