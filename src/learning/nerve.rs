//! Input units of a network.

use serde::{Deserialize, Serialize};

/// A zero-input source unit whose value is set from outside the network.
///
/// The environment writes one nerve per sensor every tick, before the network
/// predicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nerve {
    value: f64,
}

impl Nerve {
    /// Creates a nerve holding `value`.
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// The current value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Overwrites the current value.
    #[inline]
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// A nerve predicts whatever it was last set to.
    #[inline]
    pub fn predict(&self) -> f64 {
        self.value
    }
}
