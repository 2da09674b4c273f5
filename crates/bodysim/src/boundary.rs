//! Rectangular walls and the visible region
//!
//! The walls are anchored where the view was when boundary collisions were
//! switched on (`collide_offset`); panning moves the view (`current_offset`)
//! and the walls travel with it by the difference of the two.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::body::Body;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Offset> for Vector2<f64> {
    fn from(offset: Offset) -> Self {
        Vector2::new(offset.x, offset.y)
    }
}

/// Box the bodies bounce around in when boundary collisions are enabled
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::boundary::Boundary;
///
/// let walls = Boundary::new(100.0, 100.0);
/// let mut body = Body::builder()
///     .radius(5.0)
///     .position(97.0, 50.0)
///     .velocity(3.0, 1.0)
///     .build();
///
/// let hits = walls.reflect(&mut body, 1.0);
///
/// assert_eq!(hits, 1);
/// assert_eq!(body.position.x, 93.0);
/// assert_eq!(body.velocity.x, -3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct Boundary {
    pub width: f64,
    pub height: f64,
    /// Pan offset of the view right now
    pub current_offset: Offset,
    /// Pan offset when the walls were put up
    pub collide_offset: Offset,
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Boundary {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            current_offset: Offset::default(),
            collide_offset: Offset::default(),
        }
    }

    /// Top-left corner of the walls in world coordinates
    pub fn origin(&self) -> Vector2<f64> {
        Vector2::from(self.current_offset) - Vector2::from(self.collide_offset)
    }

    /// Bounces a body back inside the walls, returning how many walls it hit
    ///
    /// Each axis is handled on its own, x first. A hit flips the velocity
    /// along that axis, scales both components by `restitution` and mirrors
    /// the position about the wall. A body travelling more than a box width
    /// per step can still end up outside.
    pub fn reflect(&self, body: &mut Body, restitution: f64) -> usize {
        let origin = self.origin();
        let hits_x = self.reflect_axis(body, 0, origin.x, self.width, restitution);
        let hits_y = self.reflect_axis(body, 1, origin.y, self.height, restitution);
        usize::from(hits_x) + usize::from(hits_y)
    }

    fn reflect_axis(
        &self,
        body: &mut Body,
        axis: usize,
        origin: f64,
        extent: f64,
        restitution: f64,
    ) -> bool {
        let near = origin + body.radius;
        let far = origin + extent - body.radius;
        let position = body.position[axis];

        if !(position >= far || position <= near) {
            return false;
        }

        let across = 1 - axis;
        body.velocity[axis] = restitution * -body.velocity[axis];
        body.velocity[across] *= restitution;

        body.position[axis] = if position >= far {
            2.0 * far - position
        } else {
            2.0 * near - position
        };

        true
    }
}

/// Visible part of the world, used to drop bodies that wandered off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point2<f64>,
    pub size: Vector2<f64>,
}

impl Viewport {
    pub fn new(center: Point2<f64>, size: Vector2<f64>) -> Self {
        Self { center, size }
    }

    /// Whether any part of the body's disc lies in the view shifted by `offset`
    pub fn contains(&self, body: &Body, offset: Vector2<f64>) -> bool {
        let half = self.size / 2.0;
        let center = self.center + offset;

        body.position.x <= center.x + half.x + body.radius
            && body.position.x >= center.x - half.x - body.radius
            && body.position.y <= center.y + half.y + body.radius
            && body.position.y >= center.y - half.y - body.radius
    }
}
