//! One tick of the simulation
//!
//! A step visits every unordered pair of live bodies once, in store order.
//! Touching pairs go to collision response, the rest accumulate forces.
//! Afterwards every surviving movable body is integrated and bounced off the
//! walls. Bodies merged away during the pair pass are skipped from then on.

use tracing::{debug, instrument, trace};

use crate::body::BodyId;
use crate::collisions::{
    CollisionOutcome, CollisionResponse, PairClass, Separation, Side, classify, resolve,
};
use crate::config::SimConfig;
use crate::forces::ForceAccumulator;
use crate::integrator::SemiImplicitEuler;
use crate::store::{BodyHandle, BodyStore};

/// A body absorbed into another during a step
///
/// Anything following `absorbed` (a camera, a selection) should switch to
/// `survivor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// What happened during a step besides the bodies moving
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub merges: Vec<Merge>,
    pub bounces: usize,
    /// Walls hit, counted per axis
    pub boundary_hits: usize,
}

impl StepReport {
    /// Every pairwise and wall collision of the step
    pub fn collisions(&self) -> usize {
        self.merges.len() + self.bounces + self.boundary_hits
    }

    /// Id to follow in place of `id` after this step
    pub fn retarget(&self, id: BodyId) -> BodyId {
        self.merges
            .iter()
            .fold(id, |current, merge| {
                if merge.absorbed == current {
                    merge.survivor
                } else {
                    current
                }
            })
    }
}

/// Advances every body in `store` by one step of `config.timestep`
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::config::SimConfig;
/// use bodysim::step::step;
/// use bodysim::store::BodyStore;
///
/// let mut store = BodyStore::new();
/// store.insert(Body::with_mass(100.0, [0.0, 0.0], [0.0, 0.0]));
/// store.insert(Body::with_mass(100.0, [10.0, 0.0], [0.0, 0.0]));
///
/// step(&mut store, &SimConfig::default().with_gravity(1.0));
///
/// let bodies: Vec<_> = store.iter().collect();
/// assert!(bodies[0].velocity.x > 0.0);
/// assert!(bodies[1].velocity.x < 0.0);
/// ```
#[instrument(skip_all, fields(bodies = store.len()))]
pub fn step(store: &mut BodyStore, config: &SimConfig) -> StepReport {
    let mut report = StepReport::default();

    if store.len() > 1 && !config.paused && config.has_pair_interactions() {
        pair_pass(store, config, &mut report);
    }

    let integrator = SemiImplicitEuler::from_config(config);
    store.iter_mut().filter(|b| b.is_movable()).for_each(|body| {
        integrator.advance(body);
        if config.boundary_collisions {
            report.boundary_hits += config.boundary.reflect(body, config.restitution);
        }
    });

    debug!(
        survivors = store.len(),
        merges = report.merges.len(),
        bounces = report.bounces,
        boundary_hits = report.boundary_hits,
        "step complete"
    );

    report
}

fn pair_pass(store: &mut BodyStore, config: &SimConfig, report: &mut StepReport) {
    let forces = ForceAccumulator::from_config(config);
    let response = CollisionResponse::from_config(config);
    let slots = store.slot_count();

    for i in 0..slots {
        for j in (i + 1)..slots {
            let (Some(first), Some(second)) = (store.handle(i), store.handle(j)) else {
                continue;
            };
            if !store.is_alive(first) {
                break;
            }

            let merged = visit_pair(store, first, second, &forces, response, config, report);
            if let Some(merge) = merged {
                report.merges.push(merge);
            }
        }
    }
}

/// Handles one pair, returning the merge it caused if any
fn visit_pair(
    store: &mut BodyStore,
    first: BodyHandle,
    second: BodyHandle,
    forces: &ForceAccumulator,
    response: CollisionResponse,
    config: &SimConfig,
    report: &mut StepReport,
) -> Option<Merge> {
    let (a, b) = store.pair_mut(first, second)?;
    let separation = Separation::between(a, b);

    match classify(a, b, &separation) {
        PairClass::Separated => {
            forces.accumulate(a, b, &separation);
            None
        }
        PairClass::Contact if config.pairwise_collisions && a.collide && b.collide => {
            let ids = (a.id, b.id);
            match resolve(a, b, response) {
                CollisionOutcome::Bounced => {
                    trace!(first = ids.0.0, second = ids.1.0, "bounce");
                    report.bounces += 1;
                    None
                }
                CollisionOutcome::Merged { absorbed } => {
                    let (merge, doomed) = match absorbed {
                        Side::First => (Merge { survivor: ids.1, absorbed: ids.0 }, first),
                        Side::Second => (Merge { survivor: ids.0, absorbed: ids.1 }, second),
                    };
                    trace!(survivor = merge.survivor.0, absorbed = merge.absorbed.0, "merge");
                    store.remove(doomed);
                    Some(merge)
                }
            }
        }
        // Touching without collision response: no force either
        PairClass::Contact => None,
    }
}
