//! Pairwise force laws
//!
//! Gravity is expressed as a field scaled by the other body's mass; the
//! electrostatic and spring laws produce one scalar force along the pair
//! axis that each body divides by its own mass.

use nalgebra::Vector2;

use crate::body::Body;
use crate::collisions::Separation;
use crate::config::SimConfig;

pub mod electrostatic;
pub mod gravity;
pub mod spring;

#[cfg(test)]
mod electrostatic_test;

pub use electrostatic::Electrostatic;
pub use gravity::Gravity;
pub use spring::Spring;

/// The force laws enabled for one step
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::collisions::Separation;
/// use bodysim::config::SimConfig;
/// use bodysim::forces::ForceAccumulator;
///
/// let mut a = Body::with_mass(100.0, [0.0, 0.0], [0.0, 0.0]);
/// let mut b = Body::with_mass(100.0, [10.0, 0.0], [0.0, 0.0]);
/// let separation = Separation::between(&a, &b);
///
/// let forces = ForceAccumulator::from_config(&SimConfig::default().with_gravity(1.0));
/// forces.accumulate(&mut a, &mut b, &separation);
///
/// assert!(a.acceleration.x > 0.0);
/// assert_eq!(a.acceleration.x, -b.acceleration.x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceAccumulator {
    pub gravity: Option<Gravity>,
    pub electrostatic: Option<Electrostatic>,
    pub spring: Option<Spring>,
}

impl ForceAccumulator {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            gravity: Gravity::from_config(config),
            electrostatic: Electrostatic::from_config(config),
            spring: Spring::from_config(config),
        }
    }

    /// Adds the pair's mutual accelerations to both bodies
    ///
    /// Pairs of immovable bodies are skipped and immovable bodies never
    /// gain acceleration. Springs in reach also damp both velocities.
    pub fn accumulate(&self, a: &mut Body, b: &mut Body, separation: &Separation) {
        if a.immovable && b.immovable {
            return;
        }

        let distance = separation.distance();
        let field = self
            .gravity
            .map_or_else(Vector2::zeros, |gravity| gravity.field(separation));

        let mut scalar = 0.0;
        if let Some(electrostatic) = self.electrostatic {
            scalar += electrostatic.force(a, b, separation);
        }
        if let Some(spring) = self.spring.filter(|spring| spring.in_reach(distance)) {
            scalar += spring.force(distance);
            spring.damp(a, b);
        }

        let force = Vector2::new(
            scalar * separation.delta.x / distance,
            scalar * separation.delta.y / distance,
        );

        if a.is_movable() {
            a.acceleration += field * b.mass + force / a.mass;
        }
        if b.is_movable() {
            b.acceleration -= field * a.mass + force / b.mass;
        }
    }
}
