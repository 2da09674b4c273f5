use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::boundary::Viewport;

/// Stable reference to a slot in a [`BodyStore`]
///
/// Handles stay valid while bodies are removed; only [`BodyStore::compact`]
/// invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    body: Body,
    alive: bool,
}

/// Ordered arena holding every body of one simulation tick
///
/// Removal only clears a liveness flag, so a forward scan over slots never
/// skips or revisits a body when an earlier or later one is merged away.
/// Insertion order is kept and decides the order pairs are visited in.
///
/// # Examples
///
/// ```
/// use bodysim::body::Body;
/// use bodysim::store::BodyStore;
///
/// let mut store = BodyStore::new();
/// let a = store.insert(Body::with_mass(1.0, [0.0, 0.0], [0.0, 0.0]));
/// let b = store.insert(Body::with_mass(2.0, [5.0, 0.0], [0.0, 0.0]));
///
/// assert_eq!(store.len(), 2);
/// assert!(store.remove_by_id(a));
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.iter().next().map(|body| body.id), Some(b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    slots: Vec<Slot>,
    live: usize,
    next_id: u32,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot, keeping the bodies' ids and order
    pub fn from_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut store = Self::new();
        bodies.into_iter().for_each(|body| {
            store.push(body);
        });
        store
    }

    /// Adds a body under a freshly assigned id and returns that id
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        body.id = id;
        self.push(body);
        id
    }

    /// Adds a body keeping the id it already carries
    pub fn push(&mut self, body: Body) -> BodyHandle {
        self.next_id = self.next_id.max(body.id.0.saturating_add(1));
        self.slots.push(Slot { body, alive: true });
        self.live += 1;
        BodyHandle(self.slots.len() - 1)
    }

    /// Id the next [`insert`](Self::insert) will hand out
    pub fn next_id(&self) -> BodyId {
        BodyId(self.next_id)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots, dead ones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn handle(&self, index: usize) -> Option<BodyHandle> {
        (index < self.slots.len()).then_some(BodyHandle(index))
    }

    pub fn is_alive(&self, handle: BodyHandle) -> bool {
        self.slots.get(handle.0).is_some_and(|slot| slot.alive)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots
            .get(handle.0)
            .filter(|slot| slot.alive)
            .map(|slot| &slot.body)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.0)
            .filter(|slot| slot.alive)
            .map(|slot| &mut slot.body)
    }

    /// Mutable access to two distinct live bodies at once
    pub fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut Body, &mut Body)> {
        if a == b || !self.is_alive(a) || !self.is_alive(b) {
            return None;
        }

        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        let (low_body, high_body) = (&mut head[low].body, &mut tail[0].body);

        if a.0 < b.0 {
            Some((low_body, high_body))
        } else {
            Some((high_body, low_body))
        }
    }

    pub fn find(&self, id: BodyId) -> Option<BodyHandle> {
        self.slots
            .iter()
            .position(|slot| slot.alive && slot.body.id == id)
            .map(BodyHandle)
    }

    pub fn get_by_id(&self, id: BodyId) -> Option<&Body> {
        self.find(id).and_then(|handle| self.get(handle))
    }

    /// Marks a body as removed; returns false if it already was
    pub fn remove(&mut self, handle: BodyHandle) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(slot) if slot.alive => {
                slot.alive = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn remove_by_id(&mut self, id: BodyId) -> bool {
        self.find(id).is_some_and(|handle| self.remove(handle))
    }

    /// Removes every live body the predicate rejects, returning how many went
    pub fn retain(&mut self, mut keep: impl FnMut(&Body) -> bool) -> usize {
        let doomed: Vec<BodyHandle> = self
            .handles()
            .filter(|&handle| self.get(handle).is_some_and(|body| !keep(body)))
            .collect();

        doomed
            .into_iter()
            .filter(|&handle| self.remove(handle))
            .count()
    }

    /// Removes bodies lying entirely outside the view shifted by `offset`
    pub fn clear_offscreen(&mut self, viewport: &Viewport, offset: Vector2<f64>) -> usize {
        self.retain(|body| viewport.contains(body, offset))
    }

    /// Handles of live bodies in insertion order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, _)| BodyHandle(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.slots
            .iter()
            .filter(|slot| slot.alive)
            .map(|slot| &slot.body)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.alive)
            .map(|slot| &mut slot.body)
    }

    /// Drops dead slots. Invalidates every outstanding handle.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| slot.alive);
    }

    /// Live bodies in order, consuming the store
    pub fn into_bodies(self) -> Vec<Body> {
        self.slots
            .into_iter()
            .filter(|slot| slot.alive)
            .map(|slot| slot.body)
            .collect()
    }

    /// Shifts every body, e.g. when the view is panned
    pub fn translate(&mut self, offset: Vector2<f64>) {
        self.iter_mut().for_each(|body| {
            body.position += offset;
        });
    }

    pub fn total_mass(&self) -> f64 {
        self.iter().map(|b| b.mass).sum()
    }

    pub fn total_charge(&self) -> f64 {
        self.iter().map(|b| b.charge).sum()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Mass-weighted mean position, `None` when there is no mass to weigh
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let mass = self.total_mass();
        if self.is_empty() || mass == 0.0 {
            return None;
        }

        let weighted = self
            .iter()
            .map(|b| b.position.coords * b.mass)
            .fold(Vector2::zeros(), |acc, p| acc + p);

        Some(Point2::from(weighted / mass))
    }
}
