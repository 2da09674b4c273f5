//! Short-range springs that hold softbodies together

use crate::body::Body;
use crate::config::SimConfig;

/// Springs only link pairs closer than this multiple of the rest length
const REACH: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub constant: f64,
    pub equilibrium: f64,
    pub damping: f64,
}

impl Spring {
    pub fn new(constant: f64, equilibrium: f64, damping: f64) -> Self {
        Self {
            constant,
            equilibrium,
            damping,
        }
    }

    pub fn from_config(config: &SimConfig) -> Option<Self> {
        config.softbody.then(|| {
            Self::new(
                config.spring_constant,
                config.spring_equilibrium,
                config.damping,
            )
        })
    }

    pub fn in_reach(&self, distance: f64) -> bool {
        distance < self.equilibrium * REACH
    }

    /// Restoring force at `distance`: positive when stretched
    pub fn force(&self, distance: f64) -> f64 {
        (distance - self.equilibrium) * self.constant
    }

    /// Scales both velocities by the damping factor
    ///
    /// Applied once per linked pair, so a body with several neighbours in
    /// reach is damped several times in one step.
    pub fn damp(&self, a: &mut Body, b: &mut Body) {
        a.velocity *= self.damping;
        b.velocity *= self.damping;
    }
}
