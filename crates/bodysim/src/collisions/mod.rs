//! Contact detection and collision response between pairs of bodies
//!
//! Detection shares its distance test with the force laws; response either
//! merges the pair or bounces it with a coefficient of restitution.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod detection_test;
#[cfg(test)]
mod resolution_test;

pub use detection::{PairClass, Separation, classify};
pub use resolution::{
    CollisionOutcome, CollisionResponse, Side, bounce, first_is_larger, merge, resolve,
};
