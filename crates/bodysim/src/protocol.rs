//! Step request/response payloads exchanged with a worker
//!
//! Bodies travel as flat records with the browser front end's field names;
//! nothing is shared by reference, both directions carry full copies. Only
//! the trail position stays with the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::body::{AxisLock, Body, BodyId};
use crate::config::SimConfig;
use crate::step::{Merge, StepReport, step};
use crate::store::BodyStore;

/// Reasons a step request is refused before it reaches the physics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("time step must be finite, got {0}")]
    NonFiniteTimestep(f64),

    #[error("body {0} has neither mass nor radius")]
    DegenerateBody(u32),

    #[error("body {0} has a non-finite position or velocity")]
    NonFiniteState(u32),
}

/// One body on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct BodyRecord {
    pub x_pos: f64,
    pub y_pos: f64,
    pub x_vel: f64,
    pub y_vel: f64,
    /// Zero means "derive from mass"
    pub radius: f64,
    /// Zero means "derive from radius"
    pub mass: f64,
    pub color: String,
    pub collide: bool,
    pub charge: f64,
    pub immovable: bool,
    pub lock_axis: AxisLock,
    pub x_accel: f64,
    pub y_accel: f64,
    pub id: u32,
}

impl Default for BodyRecord {
    fn default() -> Self {
        BodyRecord::from(&Body::builder().build())
    }
}

impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        Self {
            x_pos: body.position.x,
            y_pos: body.position.y,
            x_vel: body.velocity.x,
            y_vel: body.velocity.y,
            radius: body.radius,
            mass: body.mass,
            color: body.color.clone(),
            collide: body.collide,
            charge: body.charge,
            immovable: body.immovable,
            lock_axis: body.lock,
            x_accel: body.acceleration.x,
            y_accel: body.acceleration.y,
            id: body.id.0,
        }
    }
}

impl From<BodyRecord> for Body {
    fn from(record: BodyRecord) -> Self {
        Body::builder()
            .id(BodyId(record.id))
            .position(record.x_pos, record.y_pos)
            .velocity(record.x_vel, record.y_vel)
            .acceleration(record.x_accel, record.y_accel)
            .radius(record.radius)
            .mass(record.mass)
            .charge(record.charge)
            .color(record.color)
            .collide(record.collide)
            .immovable(record.immovable)
            .lock(record.lock_axis)
            .build()
    }
}

impl BodyRecord {
    /// Rejects records the physics cannot step
    pub fn check(&self) -> Result<(), ProtocolError> {
        if self.mass == 0.0 && self.radius == 0.0 {
            return Err(ProtocolError::DegenerateBody(self.id));
        }

        let state = [self.x_pos, self.y_pos, self.x_vel, self.y_vel];
        if state.iter().any(|value| !value.is_finite()) {
            return Err(ProtocolError::NonFiniteState(self.id));
        }

        Ok(())
    }
}

/// Everything a worker needs to run one step
///
/// # Examples
///
/// ```
/// use bodysim::protocol::{BodyRecord, StepRequest};
///
/// let request = StepRequest {
///     bodies: vec![
///         BodyRecord { mass: 100.0, radius: 0.0, id: 0, ..Default::default() },
///         BodyRecord { mass: 100.0, radius: 0.0, x_pos: 0.5, id: 1, ..Default::default() },
///     ],
///     config: Default::default(),
/// };
///
/// let response = request.run().unwrap();
///
/// // Touching bodies merge by default
/// assert_eq!(response.bodies.len(), 1);
/// assert_eq!(response.bodies[0].mass, 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct StepRequest {
    #[serde(rename = "bodiesData", default)]
    pub bodies: Vec<BodyRecord>,

    #[serde(flatten)]
    pub config: SimConfig,
}

impl StepRequest {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if !self.config.timestep.is_finite() {
            return Err(ProtocolError::NonFiniteTimestep(self.config.timestep));
        }
        self.bodies.iter().try_for_each(BodyRecord::check)
    }

    /// Builds the store and settings for the step, without validating
    pub fn into_parts(self) -> (BodyStore, SimConfig) {
        let store = BodyStore::from_bodies(self.bodies.into_iter().map(Body::from));
        (store, self.config)
    }

    /// Validates, steps, and packages the survivors
    pub fn run(self) -> Result<StepResponse, ProtocolError> {
        self.validate()?;

        let (mut store, config) = self.into_parts();
        let report = step(&mut store, &config);

        Ok(StepResponse::new(&store, &report))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct MergeRecord {
    pub survivor: u32,
    pub absorbed: u32,
}

impl From<&Merge> for MergeRecord {
    fn from(merge: &Merge) -> Self {
        Self {
            survivor: merge.survivor.0,
            absorbed: merge.absorbed.0,
        }
    }
}

/// Surviving bodies after a step, in order; removed ids are simply absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub struct StepResponse {
    #[serde(rename = "bodiesData")]
    pub bodies: Vec<BodyRecord>,

    /// Absorbed bodies and who absorbed them
    #[serde(default)]
    pub merges: Vec<MergeRecord>,

    /// Pairwise and wall collisions during the step
    #[serde(default)]
    pub collisions: usize,
}

impl StepResponse {
    pub fn new(store: &BodyStore, report: &StepReport) -> Self {
        Self {
            bodies: store.iter().map(BodyRecord::from).collect(),
            merges: report.merges.iter().map(MergeRecord::from).collect(),
            collisions: report.collisions(),
        }
    }
}
