//! WASM bindings for the body sandbox.
//!
//! Two ways in:
//!
//! - [`step`] is the worker contract. A browser worker posts a step request
//!   (bodies plus settings), gets the surviving bodies back and keeps nothing
//!   between calls.
//! - The `sandbox_*` functions keep a store alive in thread-local storage
//!   (WASM is single-threaded) and hand out opaque IDs, for pages that would
//!   rather not ship every body across the boundary each frame.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // Worker side
//! onmessage = (event) => postMessage(step(event.data));
//!
//! // Or keep the bodies in WASM
//! const sandbox = sandbox_create({ G: 1, gravity: true, timestep: 0.5 });
//! sandbox_add_body(sandbox, { xPos: 0, yPos: 0, mass: 1000, radius: 0 });
//! sandbox_add_body(sandbox, { xPos: 200, yPos: 0, yVel: 2.2, mass: 1, radius: 0 });
//!
//! const summary = sandbox_step(sandbox);
//! const bodies = sandbox_get_bodies(sandbox);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::prelude::*;

use bodysim::body::{Body, BodyId, mass_from_radius, radius_from_mass};
use bodysim::boundary::Viewport;
use bodysim::config::SimConfig;
use bodysim::forces::gravity::{field_at, potential_energy};
use bodysim::protocol::{BodyRecord, MergeRecord, StepRequest, StepResponse};
use bodysim::step::StepReport;
use bodysim::store::BodyStore;

// =============================================================================
// Serialization helpers
// =============================================================================

/// Flattened settings serialize as maps; ask for plain objects instead.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for sandboxes
// =============================================================================

struct Sandbox {
    store: BodyStore,
    config: SimConfig,
}

thread_local! {
    static SANDBOXES: RefCell<HashMap<u32, Sandbox>> = RefCell::new(HashMap::new());
    static NEXT_SANDBOX_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn with_sandbox<T>(
    sandbox_id: u32,
    f: impl FnOnce(&Sandbox) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SANDBOXES.with(|sandboxes| {
        let sandboxes = sandboxes.borrow();
        let sandbox = sandboxes
            .get(&sandbox_id)
            .ok_or_else(|| JsError::new(&format!("Sandbox {} not found", sandbox_id)))?;
        f(sandbox)
    })
}

fn with_sandbox_mut<T>(
    sandbox_id: u32,
    f: impl FnOnce(&mut Sandbox) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SANDBOXES.with(|sandboxes| {
        let mut sandboxes = sandboxes.borrow_mut();
        let sandbox = sandboxes
            .get_mut(&sandbox_id)
            .ok_or_else(|| JsError::new(&format!("Sandbox {} not found", sandbox_id)))?;
        f(sandbox)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// What a sandbox step did besides moving bodies
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    /// Absorbed bodies and who absorbed them, for retargeting a camera
    pub merges: Vec<MergeRecord>,
    /// Pairwise and wall collisions
    pub collisions: usize,
    /// Live bodies after the step
    pub body_count: usize,
}

impl StepSummary {
    fn new(store: &BodyStore, report: &StepReport) -> Self {
        Self {
            merges: report.merges.iter().map(MergeRecord::from).collect(),
            collisions: report.collisions(),
            body_count: store.len(),
        }
    }
}

/// Conserved quantities of a sandbox
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub body_count: usize,
    pub total_mass: f64,
    pub total_charge: f64,
    pub momentum: [f64; 2],
    pub kinetic_energy: f64,
    /// Gravitational potential energy with the sandbox's G
    pub potential_energy: f64,
}

/// Visible rectangle, centred on `center`
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ViewRect {
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
}

impl From<ViewRect> for Viewport {
    fn from(rect: ViewRect) -> Self {
        Viewport::new(
            Point2::new(rect.center[0], rect.center[1]),
            Vector2::new(rect.width, rect.height),
        )
    }
}

// =============================================================================
// Worker contract
// =============================================================================

/// Run one step on a posted request and return the response.
///
/// # Arguments
/// * `request` - `{ bodiesData, G, K, uniformg, ..., width, height, currentOffset }`
///
/// # Returns
/// `{ bodiesData, merges, collisions }`
#[wasm_bindgen]
pub fn step(request: JsValue) -> Result<JsValue, JsError> {
    let request: StepRequest = from_js(request)?;
    let response: StepResponse = request.run().map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&response)
}

// =============================================================================
// Sandbox management functions
// =============================================================================

/// Create a sandbox with the given settings.
///
/// Missing settings fall back to their defaults. Returns a sandbox ID for use
/// with the other functions.
#[wasm_bindgen]
pub fn sandbox_create(config: JsValue) -> Result<u32, JsError> {
    let config: SimConfig = if config.is_undefined() || config.is_null() {
        SimConfig::default()
    } else {
        from_js(config)?
    };

    let id = NEXT_SANDBOX_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SANDBOXES.with(|sandboxes| {
        sandboxes.borrow_mut().insert(
            id,
            Sandbox {
                store: BodyStore::new(),
                config,
            },
        );
    });

    debug!(sandbox = id, "sandbox created");
    Ok(id)
}

/// Delete a sandbox to free memory.
#[wasm_bindgen]
pub fn sandbox_delete(sandbox_id: u32) {
    SANDBOXES.with(|sandboxes| {
        sandboxes.borrow_mut().remove(&sandbox_id);
    });
}

/// Replace the sandbox's settings, e.g. after a UI change.
#[wasm_bindgen]
pub fn sandbox_set_config(sandbox_id: u32, config: JsValue) -> Result<(), JsError> {
    let config: SimConfig = from_js(config)?;
    with_sandbox_mut(sandbox_id, |sandbox| {
        sandbox.config = config;
        Ok(())
    })
}

/// Get the sandbox's settings.
#[wasm_bindgen]
pub fn sandbox_get_config(sandbox_id: u32) -> Result<JsValue, JsError> {
    with_sandbox(sandbox_id, |sandbox| to_js(&sandbox.config))
}

// =============================================================================
// Body management
// =============================================================================

/// Add a body to the sandbox.
///
/// # Arguments
/// * `sandbox_id` - Sandbox ID
/// * `body` - Body record (`xPos`, `yPos`, `xVel`, `yVel`, `mass`, `radius`, ...)
///
/// # Returns
/// The new body's ID; any `id` in the record is ignored
#[wasm_bindgen]
pub fn sandbox_add_body(sandbox_id: u32, body: JsValue) -> Result<u32, JsError> {
    let record: BodyRecord = from_js(body)?;
    record.check().map_err(|e| JsError::new(&e.to_string()))?;

    with_sandbox_mut(sandbox_id, |sandbox| {
        Ok(sandbox.store.insert(Body::from(record)).0)
    })
}

/// Remove a body from the sandbox.
///
/// # Returns
/// true if the body was found and removed
#[wasm_bindgen]
pub fn sandbox_remove_body(sandbox_id: u32, body_id: u32) -> Result<bool, JsError> {
    with_sandbox_mut(sandbox_id, |sandbox| {
        Ok(sandbox.store.remove_by_id(BodyId(body_id)))
    })
}

/// Remove every body.
#[wasm_bindgen]
pub fn sandbox_clear(sandbox_id: u32) -> Result<(), JsError> {
    with_sandbox_mut(sandbox_id, |sandbox| {
        sandbox.store = BodyStore::new();
        Ok(())
    })
}

/// Remove bodies that are entirely outside the view.
///
/// With boundary collisions on, the view is shifted with the walls.
///
/// # Arguments
/// * `sandbox_id` - Sandbox ID
/// * `view` - `{ center: [x, y], width, height }`
///
/// # Returns
/// Number of bodies removed
#[wasm_bindgen]
pub fn sandbox_clear_offscreen(sandbox_id: u32, view: JsValue) -> Result<usize, JsError> {
    let view: ViewRect = from_js(view)?;

    with_sandbox_mut(sandbox_id, |sandbox| {
        let offset = if sandbox.config.boundary_collisions {
            sandbox.config.boundary.origin()
        } else {
            Vector2::zeros()
        };
        Ok(sandbox.store.clear_offscreen(&view.into(), offset))
    })
}

/// Shift every body, used when the view is panned.
#[wasm_bindgen]
pub fn sandbox_translate(sandbox_id: u32, dx: f64, dy: f64) -> Result<(), JsError> {
    with_sandbox_mut(sandbox_id, |sandbox| {
        sandbox.store.translate(Vector2::new(dx, dy));
        Ok(())
    })
}

// =============================================================================
// Sandbox stepping
// =============================================================================

/// Advance the sandbox by one step of its configured timestep.
///
/// # Returns
/// `{ merges, collisions, bodyCount }`
#[wasm_bindgen]
pub fn sandbox_step(sandbox_id: u32) -> Result<JsValue, JsError> {
    with_sandbox_mut(sandbox_id, |sandbox| {
        let report = bodysim::step::step(&mut sandbox.store, &sandbox.config);
        sandbox.store.compact();
        to_js(&StepSummary::new(&sandbox.store, &report))
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies as wire records, in store order.
#[wasm_bindgen]
pub fn sandbox_get_bodies(sandbox_id: u32) -> Result<JsValue, JsError> {
    with_sandbox(sandbox_id, |sandbox| {
        let bodies: Vec<BodyRecord> = sandbox.store.iter().map(BodyRecord::from).collect();
        to_js(&bodies)
    })
}

/// Get body count.
#[wasm_bindgen]
pub fn sandbox_body_count(sandbox_id: u32) -> Result<usize, JsError> {
    with_sandbox(sandbox_id, |sandbox| Ok(sandbox.store.len()))
}

/// Mass-weighted center of the live bodies.
///
/// # Returns
/// `[x, y]`, or `null` when there is nothing with mass
#[wasm_bindgen]
pub fn sandbox_center_of_mass(sandbox_id: u32) -> Result<JsValue, JsError> {
    with_sandbox(sandbox_id, |sandbox| {
        let center = sandbox.store.center_of_mass().map(|c| [c.x, c.y]);
        to_js(&center)
    })
}

/// Gravitational field at a point, for drawing field vectors or heat maps.
///
/// # Returns
/// `[gx, gy]`
#[wasm_bindgen]
pub fn sandbox_field_at(sandbox_id: u32, x: f64, y: f64) -> Result<JsValue, JsError> {
    with_sandbox(sandbox_id, |sandbox| {
        let field = field_at(
            &sandbox.store,
            Point2::new(x, y),
            sandbox.config.gravitational_constant,
        );
        to_js(&[field.x, field.y])
    })
}

/// Totals for checking conservation.
#[wasm_bindgen]
pub fn sandbox_diagnostics(sandbox_id: u32) -> Result<JsValue, JsError> {
    with_sandbox(sandbox_id, |sandbox| {
        let store = &sandbox.store;
        let momentum = store.total_momentum();

        to_js(&Diagnostics {
            body_count: store.len(),
            total_mass: store.total_mass(),
            total_charge: store.total_charge(),
            momentum: [momentum.x, momentum.y],
            kinetic_energy: store.kinetic_energy(),
            potential_energy: potential_energy(store, sandbox.config.gravitational_constant),
        })
    })
}

// =============================================================================
// Utility functions
// =============================================================================

/// Radius a body of this mass gets when its radius is left at 0.
#[wasm_bindgen]
pub fn radius_for_mass(mass: f64) -> f64 {
    radius_from_mass(mass)
}

/// Mass a body of this radius gets when its mass is left at 0.
#[wasm_bindgen]
pub fn mass_for_radius(radius: f64) -> f64 {
    mass_from_radius(radius)
}
