use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::boundary::Viewport;
use crate::store::BodyStore;

fn at(x: f64, y: f64) -> Body {
    Body::builder().mass(1.0).radius(1.0).position(x, y).build()
}

fn with_id(id: u32) -> Body {
    Body::builder().id(BodyId(id)).build()
}

fn ids(store: &BodyStore) -> Vec<u32> {
    store.iter().map(|b| b.id.0).collect()
}

#[test]
fn test_insert_assigns_sequential_ids() {
    let mut store = BodyStore::new();

    assert_eq!(store.insert(at(0.0, 0.0)), BodyId(0));
    assert_eq!(store.insert(at(1.0, 0.0)), BodyId(1));
    assert_eq!(store.next_id(), BodyId(2));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_push_keeps_ids_and_advances_next_id() {
    let mut store = BodyStore::from_bodies([with_id(4), with_id(10), with_id(2)]);

    assert_eq!(ids(&store), vec![4, 10, 2]);
    assert_eq!(store.next_id(), BodyId(11));
    assert_eq!(store.insert(at(0.0, 0.0)), BodyId(11));
}

#[test]
fn test_remove_keeps_handles_stable() {
    let mut store = BodyStore::from_bodies([with_id(0), with_id(1), with_id(2)]);
    let middle = store.find(BodyId(1)).unwrap();
    let last = store.find(BodyId(2)).unwrap();

    assert!(store.remove(middle));
    assert!(!store.remove(middle));

    assert_eq!(store.len(), 2);
    assert_eq!(store.slot_count(), 3);
    assert!(!store.is_alive(middle));
    assert!(store.get(middle).is_none());
    assert_eq!(store.get(last).map(|b| b.id), Some(BodyId(2)));
    assert_eq!(ids(&store), vec![0, 2]);
}

#[test]
fn test_removed_ids_are_not_reused() {
    let mut store = BodyStore::new();
    store.insert(at(0.0, 0.0));
    let id = store.insert(at(1.0, 0.0));
    store.remove_by_id(id);

    assert_eq!(store.insert(at(2.0, 0.0)), BodyId(2));
}

#[test]
fn test_find_and_remove_by_id() {
    let mut store = BodyStore::from_bodies([with_id(7), with_id(3)]);

    assert_eq!(store.get_by_id(BodyId(3)).map(|b| b.id), Some(BodyId(3)));
    assert!(store.find(BodyId(99)).is_none());

    assert!(store.remove_by_id(BodyId(7)));
    assert!(!store.remove_by_id(BodyId(7)));
    assert!(store.get_by_id(BodyId(7)).is_none());
}

#[test]
fn test_handle_out_of_range() {
    let store = BodyStore::from_bodies([with_id(0)]);

    assert!(store.handle(0).is_some());
    assert!(store.handle(1).is_none());
}

#[test]
fn test_pair_mut_follows_argument_order() {
    let mut store = BodyStore::from_bodies([with_id(0), with_id(1)]);
    let first = store.find(BodyId(0)).unwrap();
    let second = store.find(BodyId(1)).unwrap();

    let (a, b) = store.pair_mut(second, first).unwrap();
    assert_eq!((a.id, b.id), (BodyId(1), BodyId(0)));

    a.mass = 42.0;
    assert_eq!(store.get(second).map(|b| b.mass), Some(42.0));
}

#[test]
fn test_pair_mut_rejects_same_or_dead_handle() {
    let mut store = BodyStore::from_bodies([with_id(0), with_id(1)]);
    let first = store.find(BodyId(0)).unwrap();
    let second = store.find(BodyId(1)).unwrap();

    assert!(store.pair_mut(first, first).is_none());

    store.remove(second);
    assert!(store.pair_mut(first, second).is_none());
}

#[test]
fn test_retain_reports_removed_count() {
    let mut store = BodyStore::from_bodies((0..6).map(with_id));

    let removed = store.retain(|b| b.id.0 % 2 == 0);

    assert_eq!(removed, 3);
    assert_eq!(ids(&store), vec![0, 2, 4]);
}

#[test]
fn test_clear_offscreen() {
    let mut store = BodyStore::new();
    store.insert(at(0.0, 0.0));
    store.insert(at(500.0, 0.0));
    store.insert(at(0.0, -500.0));
    let view = Viewport::new(Point2::origin(), Vector2::new(200.0, 200.0));

    assert_eq!(store.clear_offscreen(&view, Vector2::zeros()), 2);
    assert_eq!(ids(&store), vec![0]);
}

#[test]
fn test_compact_and_into_bodies_keep_order() {
    let mut store = BodyStore::from_bodies((0..4).map(with_id));
    store.remove_by_id(BodyId(1));

    store.compact();
    assert_eq!(store.slot_count(), 3);
    assert_eq!(ids(&store), vec![0, 2, 3]);

    let bodies = store.into_bodies();
    assert_eq!(bodies.iter().map(|b| b.id.0).collect::<Vec<_>>(), vec![0, 2, 3]);
}

#[test]
fn test_translate_moves_every_body() {
    let mut store = BodyStore::new();
    store.insert(at(1.0, 1.0));
    store.insert(at(-2.0, 3.0));

    store.translate(Vector2::new(10.0, -1.0));

    let positions: Vec<_> = store.iter().map(|b| b.position).collect();
    assert_eq!(positions, vec![Point2::new(11.0, 0.0), Point2::new(8.0, 2.0)]);
}

#[test]
fn test_totals() {
    let mut store = BodyStore::new();
    store.insert(Body::builder().mass(2.0).charge(1.0).velocity(3.0, 0.0).build());
    store.insert(Body::builder().mass(4.0).charge(-3.0).velocity(0.0, -1.0).build());

    assert_eq!(store.total_mass(), 6.0);
    assert_eq!(store.total_charge(), -2.0);
    assert_eq!(store.total_momentum(), Vector2::new(6.0, -4.0));
    assert_relative_eq!(store.kinetic_energy(), 9.0 + 2.0);
}

#[test]
fn test_center_of_mass() {
    let mut store = BodyStore::new();
    assert!(store.center_of_mass().is_none());

    store.insert(Body::builder().mass(1.0).position(0.0, 0.0).build());
    store.insert(Body::builder().mass(3.0).position(4.0, -8.0).build());

    let center = store.center_of_mass().unwrap();
    assert_relative_eq!(center.x, 3.0);
    assert_relative_eq!(center.y, -6.0);
}

#[test]
fn test_center_of_mass_ignores_removed_bodies() {
    let mut store = BodyStore::new();
    store.insert(Body::builder().mass(1.0).position(0.0, 0.0).build());
    let gone = store.insert(Body::builder().mass(100.0).position(50.0, 0.0).build());
    store.insert(Body::builder().mass(1.0).position(2.0, 0.0).build());
    store.remove_by_id(gone);

    assert_eq!(store.center_of_mass(), Some(Point2::new(1.0, 0.0)));
}

#[test]
fn test_handles_index_slots_in_order() {
    let mut store = BodyStore::from_bodies((0..3).map(with_id));
    store.remove_by_id(BodyId(0));

    let handles: Vec<_> = store.handles().collect();
    assert_eq!(handles.iter().map(|h| h.index()).collect::<Vec<_>>(), vec![1, 2]);

    if let Some(body) = store.get_mut(handles[1]) {
        body.charge = 3.0;
    }
    assert_eq!(store.get_by_id(BodyId(2)).map(|b| b.charge), Some(3.0));
}
