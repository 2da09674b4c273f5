//! Direct-summation gravity

use nalgebra::{Point2, Vector2};

use crate::collisions::Separation;
use crate::config::SimConfig;
use crate::store::BodyStore;

/// Newtonian attraction with a configurable constant
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::collisions::Separation;
/// use bodysim::forces::Gravity;
///
/// let a = Body::with_mass(100.0, [0.0, 0.0], [0.0, 0.0]);
/// let b = Body::with_mass(100.0, [10.0, 0.0], [0.0, 0.0]);
///
/// let field = Gravity::new(1.0).field(&Separation::between(&a, &b));
///
/// // G / d², per unit mass of the other body, pointing from a to b
/// assert!((field.x - 0.01).abs() < 1e-15);
/// assert_eq!(field.y, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub constant: f64,
}

impl Gravity {
    pub fn new(constant: f64) -> Self {
        Self { constant }
    }

    /// `None` when gravity is switched off or has no strength
    pub fn from_config(config: &SimConfig) -> Option<Self> {
        (config.gravity && config.gravitational_constant != 0.0)
            .then(|| Self::new(config.gravitational_constant))
    }

    /// Acceleration per unit mass of `b` felt by `a`, along `a → b`
    ///
    /// Uses the clamped distance, so it stays finite for overlapping bodies.
    pub fn field(&self, separation: &Separation) -> Vector2<f64> {
        let distance = separation.distance();
        let g = self.constant / separation.clamped_squared();
        Vector2::new(
            g * separation.delta.x / distance,
            g * separation.delta.y / distance,
        )
    }
}

/// Gravitational field at an arbitrary point
///
/// Bodies whose disc covers the point are left out.
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::forces::gravity::field_at;
/// use bodysim::store::BodyStore;
/// use nalgebra::Point2;
///
/// let mut store = BodyStore::new();
/// store.insert(Body::with_mass(100.0, [0.0, 0.0], [0.0, 0.0]));
///
/// let field = field_at(&store, Point2::new(10.0, 0.0), 1.0);
/// assert!((field.x + 1.0).abs() < 1e-12);
/// ```
pub fn field_at(store: &BodyStore, point: Point2<f64>, constant: f64) -> Vector2<f64> {
    store
        .iter()
        .filter_map(|body| {
            let toward = body.position - point;
            let distance = toward.magnitude();
            (distance >= body.radius)
                .then(|| toward * (constant * body.mass / (distance * distance * distance)))
        })
        .fold(Vector2::zeros(), |acc, g| acc + g)
}

/// Total gravitational potential energy, each pair counted once
///
/// Uses the same clamped distance as the force so the two stay consistent.
pub fn potential_energy(store: &BodyStore, constant: f64) -> f64 {
    let bodies: Vec<_> = store.iter().collect();

    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..].iter().map(move |b| {
                let separation = Separation::between(a, b);
                -constant * a.mass * b.mass / separation.distance()
            })
        })
        .sum()
}
