use serde::{Deserialize, Serialize};

use crate::error::{EvoError, Result};

/// Parameters of the neural driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverParams {
    /// Ray directions in degrees relative to the heading, one nerve each.
    pub ray_angles: Vec<f64>,
    /// Reading used for rays that hit nothing, and cap for all readings.
    pub maximum_ray_distance: f64,
    /// Hidden layer width. `None` uses one neuron per ray.
    pub hidden_layer_size: Option<usize>,
    /// Whether a crash deactivates the driver for the rest of its generation.
    pub disable_on_crash: bool,
    /// Spawn positions are jittered by up to this distance on each axis.
    pub maximum_spawn_offset: f64,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            ray_angles: vec![-35.0, 0.0, 35.0, 180.0],
            maximum_ray_distance: 10.0,
            hidden_layer_size: None,
            disable_on_crash: true,
            maximum_spawn_offset: 0.0,
        }
    }
}

impl DriverParams {
    /// Number of rays, which is also the network's input count.
    pub fn ray_count(&self) -> usize {
        self.ray_angles.len()
    }

    /// Layer sizes of the driver network: hidden layer, then the two outputs.
    pub fn layer_sizes(&self) -> [usize; 2] {
        [self.hidden_layer_size.unwrap_or(self.ray_count()), 2]
    }

    /// Rejects drivers without rays, without a finite positive ray range or
    /// with an infinite spawn offset.
    pub fn validate(&self) -> Result<()> {
        if self.ray_angles.is_empty() {
            return Err(EvoError::invalid_argument("a driver needs at least one ray"));
        }
        if !self.maximum_ray_distance.is_finite() || self.maximum_ray_distance <= 0.0 {
            return Err(EvoError::invalid_argument(format!(
                "maximum_ray_distance must be finite and positive, got {}",
                self.maximum_ray_distance
            )));
        }
        if !self.maximum_spawn_offset.is_finite() {
            return Err(EvoError::invalid_argument(format!(
                "maximum_spawn_offset must be finite, got {}",
                self.maximum_spawn_offset
            )));
        }
        Ok(())
    }
}

/// Thresholds of the forward/backward avoidance machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceParams {
    /// Forward clearance below which the machine starts backing up.
    pub close_to_wall: f64,
    /// Forward clearance above which the machine drives forward again. Must be
    /// strictly larger than `close_to_wall`.
    pub clear_of_wall: f64,
    /// Linear command per unit of clearance.
    pub linear_input_multiplier: f64,
}

impl Default for AvoidanceParams {
    fn default() -> Self {
        Self {
            close_to_wall: 2.5,
            clear_of_wall: 3.5,
            linear_input_multiplier: 0.1,
        }
    }
}

impl AvoidanceParams {
    /// Rejects thresholds without a hysteresis band.
    pub fn validate(&self) -> Result<()> {
        if self.close_to_wall.is_nan()
            || self.clear_of_wall.is_nan()
            || self.clear_of_wall <= self.close_to_wall
        {
            return Err(EvoError::invalid_argument(format!(
                "clear_of_wall ({}) must be strictly larger than close_to_wall ({})",
                self.clear_of_wall, self.close_to_wall
            )));
        }
        Ok(())
    }
}

/// Parameters of the rule-based steering controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringParams {
    /// Readings beyond this distance count as misses.
    pub maximum_ray_distance: f64,
    /// Angular command per unit of left/right clearance difference.
    pub angular_input_multiplier: f64,
    /// Angular command per unit of half-left/half-right clearance difference.
    pub half_angular_input_multiplier: f64,
    /// Linear speed selection.
    pub avoidance: AvoidanceParams,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            maximum_ray_distance: 15.0,
            angular_input_multiplier: 2.0,
            half_angular_input_multiplier: 7.0,
            avoidance: AvoidanceParams::default(),
        }
    }
}
