//! Pair separation and the contact test
//!
//! One distance test serves two purposes: it floors the squared distance fed
//! to the inverse-square forces, and a pair sitting on that floor is treated
//! as touching instead of interacting.

use nalgebra::Vector2;

use crate::body::Body;

/// Geometry of an ordered pair `(a, b)`
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::collisions::Separation;
///
/// let a = Body::builder().radius(1.0).position(0.0, 0.0).build();
/// let b = Body::builder().radius(1.0).position(10.0, 0.0).build();
///
/// let separation = Separation::between(&a, &b);
/// assert!(!separation.is_contact());
/// assert_eq!(separation.distance(), 10.0);
///
/// // Closer than sqrt((r_a + r_b)² + 1) counts as contact
/// let c = Body::builder().radius(1.0).position(2.2, 0.0).build();
/// assert!(Separation::between(&a, &c).is_contact());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// `b.position - a.position`
    pub delta: Vector2<f64>,
    /// Unclamped squared distance
    pub distance_squared: f64,
    /// `(r_a + r_b)² + 1`
    pub threshold_squared: f64,
}

impl Separation {
    pub fn between(a: &Body, b: &Body) -> Self {
        let delta = b.position - a.position;
        let min_distance = a.radius + b.radius;

        Self {
            delta,
            distance_squared: delta.x * delta.x + delta.y * delta.y,
            threshold_squared: min_distance * min_distance + 1.0,
        }
    }

    /// Squared distance floored at the contact threshold
    pub fn clamped_squared(&self) -> f64 {
        self.distance_squared.max(self.threshold_squared)
    }

    /// Distance used by the force laws, never below the contact threshold
    pub fn distance(&self) -> f64 {
        self.clamped_squared().sqrt()
    }

    pub fn is_contact(&self) -> bool {
        self.distance_squared <= self.threshold_squared
    }
}

/// How a pair takes part in the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    /// Touching: handed to collision response, never to the force laws
    Contact,
    /// Apart: forces act along the clamped separation
    Separated,
}

/// Classifies a pair of distinct live bodies
///
/// Bodies sharing an id are never in contact with each other; they fall
/// through to the force laws at the clamped distance.
pub fn classify(a: &Body, b: &Body, separation: &Separation) -> PairClass {
    if separation.is_contact() && a.id != b.id {
        PairClass::Contact
    } else {
        PairClass::Separated
    }
}
