use approx::assert_relative_eq;

use crate::body::{Body, BodyId};
use crate::collisions::Separation;
use crate::config::SimConfig;
use crate::forces::{Electrostatic, ForceAccumulator};

fn charged(id: u32, charge: f64, x: f64) -> Body {
    Body::builder()
        .id(BodyId(id))
        .mass(2.0)
        .radius(1.0)
        .charge(charge)
        .position(x, 0.0)
        .build()
}

fn electrostatic_only(constant: f64) -> ForceAccumulator {
    ForceAccumulator::from_config(&SimConfig::inert().with_electrostatic(constant))
}

#[test]
fn test_off_by_default() {
    assert!(Electrostatic::from_config(&SimConfig::default()).is_none());
}

#[test]
fn test_scalar_force_sign() {
    let a = charged(0, 2.0, 0.0);
    let b = charged(1, 3.0, 10.0);
    let separation = Separation::between(&a, &b);

    // Like charges give a negative scalar along a→b
    let force = Electrostatic::new(1.0).force(&a, &b, &separation);
    assert_relative_eq!(force, -0.06, epsilon = 1e-15);
}

#[test]
fn test_like_charges_repel() {
    let mut a = charged(0, 1.0, 0.0);
    let mut b = charged(1, 1.0, 10.0);
    let separation = Separation::between(&a, &b);

    electrostatic_only(100.0).accumulate(&mut a, &mut b, &separation);

    assert!(a.acceleration.x < 0.0);
    assert!(b.acceleration.x > 0.0);
    // K·q² / d² / m = 100 / 100 / 2
    assert_relative_eq!(a.acceleration.x, -0.5, epsilon = 1e-12);
}

#[test]
fn test_opposite_charges_attract() {
    let mut a = charged(0, 1.0, 0.0);
    let mut b = charged(1, -1.0, 10.0);
    let separation = Separation::between(&a, &b);

    electrostatic_only(100.0).accumulate(&mut a, &mut b, &separation);

    assert!(a.acceleration.x > 0.0);
    assert!(b.acceleration.x < 0.0);
}

#[test]
fn test_neutral_body_feels_nothing() {
    let mut a = charged(0, 5.0, 0.0);
    let mut b = charged(1, 0.0, 10.0);
    let separation = Separation::between(&a, &b);

    electrostatic_only(100.0).accumulate(&mut a, &mut b, &separation);

    assert_eq!(a.acceleration.x, 0.0);
    assert_eq!(b.acceleration.x, 0.0);
}

#[test]
fn test_only_movable_body_accelerates() {
    let mut anchor = charged(0, 1.0, 0.0);
    anchor.immovable = true;
    let mut b = charged(1, 1.0, 10.0);
    let separation = Separation::between(&anchor, &b);

    electrostatic_only(100.0).accumulate(&mut anchor, &mut b, &separation);

    assert_eq!(anchor.acceleration.x, 0.0);
    assert!(b.acceleration.x > 0.0);
}

#[test]
fn test_two_immovable_bodies_are_skipped() {
    let mut a = charged(0, 1.0, 0.0);
    let mut b = charged(1, 1.0, 10.0);
    a.immovable = true;
    b.immovable = true;
    let separation = Separation::between(&a, &b);

    electrostatic_only(100.0).accumulate(&mut a, &mut b, &separation);

    assert_eq!(a.acceleration.x, 0.0);
    assert_eq!(b.acceleration.x, 0.0);
}
