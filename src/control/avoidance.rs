//! Forward/backward obstacle avoidance.
//!
//! The machine drives forward proportionally to the forward clearance and
//! backs up proportionally to the rear clearance once the forward clearance
//! drops below `close_to_wall`. It only drives forward again when the forward
//! clearance exceeds the strictly larger `clear_of_wall`, so readings between
//! the two thresholds never make it toggle.

use serde::{Deserialize, Serialize};

use super::fsm::{State, StateMachine};
use super::output::ControlOutput;
use super::params::AvoidanceParams;
use crate::error::Result;

/// States of the avoidance machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvoidanceState {
    /// Driving forward.
    Forward,
    /// Backing away from an obstacle ahead.
    Backward,
}

/// Sensor readings and the derived command shared by the avoidance states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvoidanceContext {
    /// Clearance straight ahead.
    pub forward_distance: f64,
    /// Clearance straight behind.
    pub backward_distance: f64,
    /// Linear command written by the active state.
    pub linear_speed_input: f64,
    /// Linear command per unit of clearance.
    pub linear_input_multiplier: f64,
}

impl State<AvoidanceContext> for AvoidanceState {
    fn update(&self, context: &mut AvoidanceContext) {
        context.linear_speed_input = match self {
            AvoidanceState::Forward => context.forward_distance * context.linear_input_multiplier,
            AvoidanceState::Backward => -context.backward_distance * context.linear_input_multiplier,
        };
    }
}

/// The avoidance state machine type.
pub type AvoidanceMachine = StateMachine<AvoidanceState, AvoidanceContext>;

/// Builds the two-state avoidance machine, starting in
/// [`AvoidanceState::Forward`].
///
/// # Errors
///
/// Returns [`crate::error::EvoError::InvalidArgument`] if `clear_of_wall` is
/// not strictly larger than `close_to_wall`.
pub fn avoidance_machine(params: &AvoidanceParams) -> Result<AvoidanceMachine> {
    params.validate()?;

    let close_to_wall = params.close_to_wall;
    let clear_of_wall = params.clear_of_wall;

    Ok(StateMachine::new(AvoidanceState::Forward)
        .with_transition(AvoidanceState::Forward, AvoidanceState::Backward, move |c: &AvoidanceContext| {
            c.forward_distance < close_to_wall
        })
        .with_transition(AvoidanceState::Backward, AvoidanceState::Forward, move |c: &AvoidanceContext| {
            c.forward_distance > clear_of_wall
        }))
}

/// A controller that only picks a linear command, from two proximity readings.
#[derive(Debug)]
pub struct AvoidanceController {
    machine: AvoidanceMachine,
    context: AvoidanceContext,
}

impl AvoidanceController {
    /// Creates a controller in the forward state.
    pub fn new(params: &AvoidanceParams) -> Result<Self> {
        Ok(Self {
            machine: avoidance_machine(params)?,
            context: AvoidanceContext {
                linear_input_multiplier: params.linear_input_multiplier,
                ..AvoidanceContext::default()
            },
        })
    }

    /// Feeds one tick of readings and returns the clamped commands.
    ///
    /// # Arguments
    ///
    /// * `forward_distance` - Clearance straight ahead
    /// * `backward_distance` - Clearance straight behind
    pub fn update(&mut self, forward_distance: f64, backward_distance: f64) -> ControlOutput {
        self.context.forward_distance = forward_distance;
        self.context.backward_distance = backward_distance;
        self.machine.update(&mut self.context);

        ControlOutput::new(self.context.linear_speed_input, 0.0).clamped()
    }

    /// The active state.
    pub fn state(&self) -> AvoidanceState {
        self.machine.active_state()
    }

    /// The shared context, including the unclamped linear command.
    pub fn context(&self) -> &AvoidanceContext {
        &self.context
    }
}
