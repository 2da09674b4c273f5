use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

/// Radius a body would have if its mass were spread over a unit-density sphere
///
/// # Examples
///
/// ```
/// use bodysim::body::{mass_from_radius, radius_from_mass};
///
/// let r = radius_from_mass(mass_from_radius(5.0));
/// assert!((r - 5.0).abs() < 1e-12);
/// ```
pub fn radius_from_mass(mass: f64) -> f64 {
    (mass * 0.75 / PI).cbrt().abs()
}

/// Mass of a unit-density sphere with the given radius
pub fn mass_from_radius(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * (radius * radius * radius)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

/// Velocity component a collision response is not allowed to touch
///
/// Only `Y` has an effect: bounces leave the y velocity of a `Y`-locked
/// body alone. `X` is accepted on the wire but currently changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum AxisLock {
    #[default]
    None,
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,
    pub radius: f64,
    pub charge: f64,
    pub position: Point2<f64>,
    /// Position at the start of the last rendered frame; never written by a step
    pub previous_position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub acceleration: Vector2<f64>,
    /// Takes part in pairwise collision response
    pub collide: bool,
    /// Exerts forces but is never moved by integration or collisions
    pub immovable: bool,
    pub lock: AxisLock,
    /// Display color, opaque to the physics
    pub color: String,
}

impl Body {
    /// Starts a builder carrying the default body parameters
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    /// Movable body with the given mass, radius derived from it
    ///
    /// # Examples
    ///
    /// ```
    /// use bodysim::body::{Body, radius_from_mass};
    ///
    /// let body = Body::with_mass(100.0, [10.0, 0.0], [0.0, 1.0]);
    /// assert_eq!(body.mass, 100.0);
    /// assert_eq!(body.radius, radius_from_mass(100.0));
    /// ```
    pub fn with_mass(mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Body::builder()
            .mass(mass)
            .radius(0.0)
            .position(position[0], position[1])
            .velocity(velocity[0], velocity[1])
            .build()
    }

    pub fn is_movable(&self) -> bool {
        !self.immovable
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Whether the radius still follows the mass (within 0.1)
    ///
    /// Bodies whose radius was set by hand keep it when they absorb mass.
    pub fn has_mass_derived_radius(&self) -> bool {
        (self.radius - radius_from_mass(self.mass)).abs() < 0.1
    }
}

/// Field-by-field constructor for [`Body`]
///
/// Defaults: origin, at rest, radius 5, mass 0, charge 0, gray, colliding,
/// movable, unlocked, id 0. A zero radius is derived from the mass and a zero
/// mass from the radius given to the builder.
///
/// # Examples
///
/// ```
/// use bodysim::body::{Body, mass_from_radius};
///
/// let body = Body::builder().position(1.0, 2.0).charge(-3.0).build();
///
/// assert_eq!(body.radius, 5.0);
/// assert_eq!(body.mass, mass_from_radius(5.0));
/// assert_eq!(body.color, "gray");
/// ```
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    id: BodyId,
    mass: f64,
    radius: f64,
    charge: f64,
    position: Point2<f64>,
    velocity: Vector2<f64>,
    acceleration: Vector2<f64>,
    collide: bool,
    immovable: bool,
    lock: AxisLock,
    color: String,
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self {
            id: BodyId(0),
            mass: 0.0,
            radius: 5.0,
            charge: 0.0,
            position: Point2::origin(),
            velocity: Vector2::zeros(),
            acceleration: Vector2::zeros(),
            collide: true,
            immovable: false,
            lock: AxisLock::None,
            color: "gray".to_string(),
        }
    }
}

impl BodyBuilder {
    pub fn id(mut self, id: BodyId) -> Self {
        self.id = id;
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Point2::new(x, y);
        self
    }

    pub fn velocity(mut self, x: f64, y: f64) -> Self {
        self.velocity = Vector2::new(x, y);
        self
    }

    pub fn acceleration(mut self, x: f64, y: f64) -> Self {
        self.acceleration = Vector2::new(x, y);
        self
    }

    pub fn collide(mut self, collide: bool) -> Self {
        self.collide = collide;
        self
    }

    pub fn immovable(mut self, immovable: bool) -> Self {
        self.immovable = immovable;
        self
    }

    pub fn lock(mut self, lock: AxisLock) -> Self {
        self.lock = lock;
        self
    }

    /// `"default"` is an alias for gray
    pub fn color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.color = if color == "default" {
            "gray".to_string()
        } else {
            color
        };
        self
    }

    pub fn build(self) -> Body {
        let radius = if self.radius != 0.0 {
            self.radius
        } else {
            radius_from_mass(self.mass)
        };
        let mass = if self.mass != 0.0 {
            self.mass
        } else {
            mass_from_radius(self.radius)
        };

        Body {
            id: self.id,
            mass,
            radius,
            charge: self.charge,
            position: self.position,
            previous_position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            collide: self.collide,
            immovable: self.immovable,
            lock: self.lock,
            color: self.color,
        }
    }
}
