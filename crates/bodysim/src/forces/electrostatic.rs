//! Coulomb interaction between charged bodies

use crate::body::Body;
use crate::collisions::Separation;
use crate::config::SimConfig;

/// Coulomb-like force with the front end's sign convention
///
/// The scalar is `K · (−q_a) · q_b / d²`, projected onto the `a → b` axis:
/// like charges give a negative value and push the pair apart, opposite
/// charges a positive one and pull it together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Electrostatic {
    pub constant: f64,
}

impl Electrostatic {
    pub fn new(constant: f64) -> Self {
        Self { constant }
    }

    pub fn from_config(config: &SimConfig) -> Option<Self> {
        config
            .electrostatic
            .then(|| Self::new(config.coulomb_constant))
    }

    pub fn force(&self, a: &Body, b: &Body, separation: &Separation) -> f64 {
        self.constant * -a.charge * b.charge / separation.clamped_squared()
    }
}
