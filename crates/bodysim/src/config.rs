//! Per-step simulation settings
//!
//! Everything a step needs besides the bodies themselves travels in one
//! immutable [`SimConfig`]. Field names on the wire follow the browser
//! front end's message objects, hence the renames.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::boundary::Boundary;

/// Constants, switches and walls for one step
///
/// Missing fields deserialize to the defaults below.
///
/// # Examples
///
/// ```
/// use bodysim::config::SimConfig;
///
/// let config = SimConfig::default()
///     .with_gravity(2.0)
///     .with_softbody(50.0, 20.0, 0.95)
///     .with_timestep(0.5);
///
/// assert!(config.gravity);
/// assert_eq!(config.gravitational_constant, 2.0);
/// assert_eq!(config.spring_equilibrium, 20.0);
/// assert_eq!(config.timestep, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct SimConfig {
    #[serde(rename = "G")]
    pub gravitational_constant: f64,

    #[serde(rename = "K")]
    pub coulomb_constant: f64,

    /// Uniform downward acceleration applied from the next step on
    #[serde(rename = "uniformg")]
    pub uniform_field: f64,

    #[serde(rename = "springConst")]
    pub spring_constant: f64,

    /// Rest length of the softbody springs; they act below 1.2× this distance
    #[serde(rename = "springEquilPos")]
    pub spring_equilibrium: f64,

    /// Velocity factor applied per spring-linked pair per step
    #[serde(rename = "dampening")]
    pub damping: f64,

    /// Coefficient of restitution for bounces and walls, in [0, 1]
    #[serde(rename = "CoR")]
    pub restitution: f64,

    pub timestep: f64,

    pub gravity: bool,

    pub electrostatic: bool,

    pub softbody: bool,

    /// Pairwise collision response
    #[serde(rename = "globalCollide")]
    pub pairwise_collisions: bool,

    /// Bounce off the walls of `boundary`
    #[serde(rename = "collide")]
    pub boundary_collisions: bool,

    /// Merge touching bodies instead of bouncing them
    pub inelastic: bool,

    pub paused: bool,

    #[serde(flatten)]
    pub boundary: Boundary,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            coulomb_constant: 1.0,
            uniform_field: 0.0,
            spring_constant: 100.0,
            spring_equilibrium: 25.0,
            damping: 0.99,
            restitution: 1.0,
            timestep: 1.0,
            gravity: true,
            electrostatic: false,
            softbody: false,
            pairwise_collisions: true,
            boundary_collisions: false,
            inelastic: true,
            paused: false,
            boundary: Boundary::default(),
        }
    }
}

impl SimConfig {
    /// Every interaction and collision switched off
    pub fn inert() -> Self {
        Self {
            gravity: false,
            electrostatic: false,
            softbody: false,
            pairwise_collisions: false,
            boundary_collisions: false,
            ..Self::default()
        }
    }

    pub fn with_gravity(mut self, constant: f64) -> Self {
        self.gravity = true;
        self.gravitational_constant = constant;
        self
    }

    pub fn with_electrostatic(mut self, constant: f64) -> Self {
        self.electrostatic = true;
        self.coulomb_constant = constant;
        self
    }

    pub fn with_softbody(mut self, spring_constant: f64, equilibrium: f64, damping: f64) -> Self {
        self.softbody = true;
        self.spring_constant = spring_constant;
        self.spring_equilibrium = equilibrium;
        self.damping = damping;
        self
    }

    pub fn with_uniform_field(mut self, strength: f64) -> Self {
        self.uniform_field = strength;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Touching bodies merge
    pub fn with_merging(mut self) -> Self {
        self.pairwise_collisions = true;
        self.inelastic = true;
        self
    }

    /// Touching bodies bounce with the given coefficient of restitution
    pub fn with_bouncing(mut self, restitution: f64) -> Self {
        self.pairwise_collisions = true;
        self.inelastic = false;
        self.restitution = restitution;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary_collisions = true;
        self.boundary = boundary;
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Whether the pairwise pass has anything to do
    pub fn has_pair_interactions(&self) -> bool {
        (self.gravity && self.gravitational_constant != 0.0)
            || self.softbody
            || (self.electrostatic && self.coulomb_constant != 0.0)
            || self.pairwise_collisions
    }
}
