//! Time integration
//!
//! Bodies are advanced with semi-implicit (symplectic) Euler: the velocity
//! takes the step's acceleration first and the position moves with the new
//! velocity.

use nalgebra::Vector2;

use crate::body::Body;
use crate::config::SimConfig;

/// Semi-implicit Euler step with a uniform background field
///
/// After moving a body its acceleration is reset to the uniform field, so
/// the field starts acting on the following step.
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::integrator::SemiImplicitEuler;
///
/// let mut body = Body::builder()
///     .velocity(1.0, 0.0)
///     .acceleration(0.0, 2.0)
///     .build();
///
/// SemiImplicitEuler::new(0.5, 9.8).advance(&mut body);
///
/// assert_eq!(body.velocity.y, 1.0);
/// assert_eq!(body.position.x, 0.5);
/// assert_eq!(body.position.y, 0.5);
/// assert_eq!(body.acceleration.y, 9.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemiImplicitEuler {
    pub dt: f64,
    pub uniform_field: f64,
}

impl SemiImplicitEuler {
    pub fn new(dt: f64, uniform_field: f64) -> Self {
        Self { dt, uniform_field }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.timestep, config.uniform_field)
    }

    /// Acceleration a body starts each step with
    pub fn resting_acceleration(&self) -> Vector2<f64> {
        Vector2::new(0.0, self.uniform_field)
    }

    /// Moves a body one step; immovable bodies are left untouched
    pub fn advance(&self, body: &mut Body) {
        if body.immovable {
            return;
        }

        body.velocity += body.acceleration * self.dt;
        body.position += body.velocity * self.dt;
        body.acceleration = self.resting_acceleration();
    }
}
