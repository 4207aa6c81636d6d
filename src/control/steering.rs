//! Rule-based steering from six proximity rays.
//!
//! The angular command steers toward the side with more room; the linear
//! command comes from the avoidance machine.

use super::avoidance::{AvoidanceContext, AvoidanceMachine, AvoidanceState, avoidance_machine};
use super::output::ControlOutput;
use super::params::SteeringParams;
use crate::error::Result;

/// Reading used for rays that hit nothing.
pub const LARGE_DISTANCE: f64 = 6e6;

/// Ray directions in degrees relative to the heading.
pub mod angles {
    /// Straight ahead.
    pub const FORWARD: f64 = 0.0;
    /// Slightly to the left.
    pub const HALF_LEFT: f64 = -25.0;
    /// Slightly to the right.
    pub const HALF_RIGHT: f64 = 25.0;
    /// Left.
    pub const LEFT: f64 = -80.0;
    /// Right.
    pub const RIGHT: f64 = 80.0;
    /// Straight behind.
    pub const BACKWARD: f64 = 180.0;
}

/// Hit distances of one sweep of the six rays. `None` means nothing was hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaySweep {
    /// Ray at [`angles::FORWARD`].
    pub forward: Option<f64>,
    /// Ray at [`angles::HALF_LEFT`].
    pub half_left: Option<f64>,
    /// Ray at [`angles::HALF_RIGHT`].
    pub half_right: Option<f64>,
    /// Ray at [`angles::LEFT`].
    pub left: Option<f64>,
    /// Ray at [`angles::RIGHT`].
    pub right: Option<f64>,
    /// Ray at [`angles::BACKWARD`].
    pub backward: Option<f64>,
}

/// Steering controller combining a proportional turn rule with the avoidance
/// machine.
#[derive(Debug)]
pub struct SteeringController {
    params: SteeringParams,
    machine: AvoidanceMachine,
    context: AvoidanceContext,
    angular_speed_input: f64,
}

impl SteeringController {
    /// Creates a controller in the forward state.
    pub fn new(params: SteeringParams) -> Result<Self> {
        let machine = avoidance_machine(&params.avoidance)?;
        let context = AvoidanceContext {
            linear_input_multiplier: params.avoidance.linear_input_multiplier,
            ..AvoidanceContext::default()
        };

        Ok(Self {
            params,
            machine,
            context,
            angular_speed_input: 0.0,
        })
    }

    /// Computes the clamped commands for one sweep.
    pub fn update(&mut self, sweep: &RaySweep) -> ControlOutput {
        let forward = self.reading(sweep.forward);
        let half_left = self.reading(sweep.half_left);
        let half_right = self.reading(sweep.half_right);
        let left = self.reading(sweep.left);
        let right = self.reading(sweep.right);
        let backward = self.reading(sweep.backward);

        self.angular_speed_input = (right - left) * self.params.angular_input_multiplier
            + (half_right - half_left) * self.params.half_angular_input_multiplier;

        self.context.forward_distance = forward;
        self.context.backward_distance = backward;
        self.machine.update(&mut self.context);

        ControlOutput::new(self.context.linear_speed_input, self.angular_speed_input).clamped()
    }

    /// The active avoidance state.
    pub fn state(&self) -> AvoidanceState {
        self.machine.active_state()
    }

    /// Turns a hit into a reading; misses and hits beyond range read as
    /// [`LARGE_DISTANCE`].
    fn reading(&self, hit: Option<f64>) -> f64 {
        match hit {
            Some(distance) if distance <= self.params.maximum_ray_distance => distance,
            _ => LARGE_DISTANCE,
        }
    }
}
