use serde::{Deserialize, Serialize};

/// The two scalar commands a controller hands to the vehicle each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    /// Forward (positive) or reverse (negative) speed command.
    pub linear: f64,
    /// Turning command, positive to the right.
    pub angular: f64,
}

impl ControlOutput {
    /// Creates an output from raw commands.
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// Both commands clamped into `[-1, 1]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            linear: self.linear.clamp(-1.0, 1.0),
            angular: self.angular.clamp(-1.0, 1.0),
        }
    }

    /// Commands as the vehicle applies them.
    ///
    /// The linear command is limited to `[0, 1]`. The angular command is
    /// damped while the vehicle moves slower than half its top speed.
    ///
    /// # Arguments
    ///
    /// * `linear_speed` - Current forward speed of the vehicle
    /// * `maximum_linear_speed` - Top speed of the vehicle
    #[must_use]
    pub fn processed(self, linear_speed: f64, maximum_linear_speed: f64) -> Self {
        let damping = if maximum_linear_speed > 0.0 {
            (2.0 * linear_speed.abs() / maximum_linear_speed).min(1.0)
        } else {
            1.0
        };

        Self {
            linear: self.linear.clamp(0.0, 1.0),
            angular: damping * self.angular,
        }
    }
}
