//! Collision response: perfectly inelastic merges and restitution bounces
//!
//! Both responses pick a "larger" body of the pair. An immovable body always
//! plays the larger part (the first of the pair if both are immovable);
//! otherwise the strictly heavier body does, with ties going to the second.

use nalgebra::{Point2, Vector2};

use crate::body::{AxisLock, Body, radius_from_mass};
use crate::config::SimConfig;

/// Smallest separation used to normalise the contact axis
const MIN_CONTACT_DISTANCE: f64 = 0.0001;

/// Which member of a pair something happened to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// How touching bodies respond
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionResponse {
    /// The smaller body is absorbed into the larger
    Merge,
    /// Bodies bounce; 1 is elastic, 0 leaves them moving with their center of mass
    Bounce { restitution: f64 },
}

impl CollisionResponse {
    pub fn from_config(config: &SimConfig) -> Self {
        if config.inelastic {
            CollisionResponse::Merge
        } else {
            CollisionResponse::Bounce {
                restitution: config.restitution,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The body on `absorbed` must be removed from the store
    Merged { absorbed: Side },
    Bounced,
}

/// Applies `response` to a touching pair
pub fn resolve(
    first: &mut Body,
    second: &mut Body,
    response: CollisionResponse,
) -> CollisionOutcome {
    match response {
        CollisionResponse::Merge => CollisionOutcome::Merged {
            absorbed: merge(first, second),
        },
        CollisionResponse::Bounce { restitution } => {
            bounce(first, second, restitution);
            CollisionOutcome::Bounced
        }
    }
}

/// Whether `first` plays the larger part of the pair
pub fn first_is_larger(first: &Body, second: &Body) -> bool {
    if first.immovable || second.immovable {
        first.immovable
    } else {
        first.mass > second.mass
    }
}

/// Merges the smaller body into the larger one in place
///
/// The larger body takes the summed mass and charge. When it is movable it
/// also moves to the pair's center of mass with the momentum-conserving
/// velocity. Its radius follows the new mass unless it had been set by hand.
/// Returns the side of the absorbed body, which the caller removes.
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::collisions::{Side, merge};
///
/// let mut a = Body::with_mass(1.0, [0.0, 0.0], [0.0, 5.0]);
/// let mut b = Body::with_mass(3.0, [4.0, 0.0], [0.0, 1.0]);
///
/// let absorbed = merge(&mut a, &mut b);
///
/// assert_eq!(absorbed, Side::First);
/// assert_eq!(b.mass, 4.0);
/// assert_eq!(b.position.x, 3.0);
/// assert_eq!(b.velocity.y, 2.0);
/// ```
pub fn merge(first: &mut Body, second: &mut Body) -> Side {
    let mass = first.mass + second.mass;
    let momentum = first.momentum() + second.momentum();
    let center = (first.position.coords * first.mass + second.position.coords * second.mass) / mass;

    let (larger, smaller, absorbed) = if first_is_larger(first, second) {
        (first, second, Side::Second)
    } else {
        (second, first, Side::First)
    };

    if larger.is_movable() {
        larger.velocity = momentum / mass;
        larger.position = Point2::from(center);
    }

    if larger.has_mass_derived_radius() {
        larger.radius = radius_from_mass(mass);
    }
    larger.mass = mass;
    larger.charge += smaller.charge;

    absorbed
}

/// Bounces a touching pair apart
///
/// The bodies are first pushed out of each other, then their velocities are
/// resolved in the frame of the collision normal (taken before the push) and
/// blended with the center-of-mass velocity by `restitution`. Immovable
/// bodies keep their position and velocity; a `Y`-locked body keeps its y
/// velocity.
pub fn bounce(first: &mut Body, second: &mut Body, restitution: f64) {
    let delta = second.position - first.position;
    let distance = (delta.x * delta.x + delta.y * delta.y)
        .sqrt()
        .max(MIN_CONTACT_DISTANCE);

    let total_mass = first.mass + second.mass;
    let mass_difference = first.mass - second.mass;

    separate(first, second, distance, total_mass);

    let center_velocity = (first.momentum() + second.momentum()) / total_mass;
    let phi = delta.y.atan2(delta.x);

    let (first_normal, first_tangent) = to_collision_frame(first.velocity, phi);
    let (second_normal, second_tangent) = to_collision_frame(second.velocity, phi);

    let (first_normal, second_normal) = if first.immovable {
        (0.0, -second_normal)
    } else if second.immovable {
        (-first_normal, 0.0)
    } else {
        (
            (mass_difference * first_normal + 2.0 * second.mass * second_normal) / total_mass,
            (2.0 * first.mass * first_normal - mass_difference * second_normal) / total_mass,
        )
    };

    let rotation = (phi.cos(), phi.sin());
    release(first, first_normal, first_tangent, rotation, center_velocity, restitution);
    release(second, second_normal, second_tangent, rotation, center_velocity, restitution);
}

/// Pushes the pair apart along the larger→smaller axis
///
/// A movable larger body no more than twice as heavy shares the correction
/// about the weighted midpoint; otherwise only the smaller body moves, flush
/// against the larger one's surface.
fn separate(first: &mut Body, second: &mut Body, distance: f64, total_mass: f64) {
    let (larger, smaller) = if first_is_larger(first, second) {
        (first, second)
    } else {
        (second, first)
    };

    if smaller.immovable {
        return;
    }

    let axis = larger.position - smaller.position;

    if larger.is_movable() && larger.mass - smaller.mass * 2.0 <= 0.0 {
        let midpoint = (larger.position.coords * smaller.mass
            + smaller.position.coords * larger.mass)
            / total_mass;

        larger.position = Point2::from(midpoint + axis * larger.radius / distance);
        smaller.position = Point2::from(midpoint - axis * (smaller.radius * 1.1) / distance);
    } else {
        smaller.position = larger.position - axis * (larger.radius + smaller.radius) / distance;
    }
}

/// Normal and tangential components of `velocity` relative to angle `phi`
fn to_collision_frame(velocity: Vector2<f64>, phi: f64) -> (f64, f64) {
    let speed = (velocity.x * velocity.x + velocity.y * velocity.y).sqrt();
    let angle = velocity.y.atan2(velocity.x) - phi;
    (speed * angle.cos(), speed * angle.sin())
}

/// Rotates a frame velocity back to world axes and writes it to the body
fn release(
    body: &mut Body,
    normal: f64,
    tangent: f64,
    (cos_phi, sin_phi): (f64, f64),
    center_velocity: Vector2<f64>,
    restitution: f64,
) {
    if body.immovable {
        return;
    }

    let x = cos_phi * normal - sin_phi * tangent;
    let y = sin_phi * normal + cos_phi * tangent;

    body.velocity.x = center_velocity.x + restitution * (x - center_velocity.x);
    if body.lock != AxisLock::Y {
        body.velocity.y = center_velocity.y + restitution * (y - center_velocity.y);
    }
}
