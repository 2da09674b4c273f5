use nalgebra::Vector2;

use crate::body::{Body, BodyId};
use crate::collisions::detection::*;

fn disc(id: u32, radius: f64, x: f64, y: f64) -> Body {
    Body::builder()
        .id(BodyId(id))
        .radius(radius)
        .mass(1.0)
        .position(x, y)
        .build()
}

#[test]
fn test_separation_delta_points_from_first_to_second() {
    let a = disc(0, 1.0, 1.0, 1.0);
    let b = disc(1, 1.0, 4.0, 5.0);

    let separation = Separation::between(&a, &b);

    assert_eq!(separation.delta, Vector2::new(3.0, 4.0));
    assert_eq!(separation.distance_squared, 25.0);
    assert_eq!(separation.distance(), 5.0);
}

#[test]
fn test_threshold_is_sum_of_radii_squared_plus_one() {
    let a = disc(0, 2.0, 0.0, 0.0);
    let b = disc(1, 3.0, 100.0, 0.0);

    let separation = Separation::between(&a, &b);

    assert_eq!(separation.threshold_squared, 26.0);
}

#[test]
fn test_distance_is_clamped_for_overlapping_bodies() {
    let a = disc(0, 2.0, 0.0, 0.0);
    let b = disc(1, 2.0, 0.0, 0.0);

    let separation = Separation::between(&a, &b);

    // sqrt(4² + 1), never zero
    assert_eq!(separation.clamped_squared(), 17.0);
    assert_eq!(separation.distance(), 17.0_f64.sqrt());
}

#[test]
fn test_contact_exactly_on_threshold() {
    // (1 + 1)² + 1 = 5, and 1² + 2² = 5
    let a = disc(0, 1.0, 0.0, 0.0);
    let b = disc(1, 1.0, 1.0, 2.0);

    assert!(Separation::between(&a, &b).is_contact());
}

#[test]
fn test_contact_slightly_beyond_touching() {
    // Radii touch at 2.0; contact reaches out to sqrt(5)
    let a = disc(0, 1.0, 0.0, 0.0);
    let b = disc(1, 1.0, 2.1, 0.0);
    let c = disc(2, 1.0, 2.3, 0.0);

    assert!(Separation::between(&a, &b).is_contact());
    assert!(!Separation::between(&a, &c).is_contact());
}

#[test]
fn test_classify_contact_and_separated() {
    let a = disc(0, 1.0, 0.0, 0.0);
    let near = disc(1, 1.0, 1.0, 0.0);
    let far = disc(2, 1.0, 50.0, 0.0);

    assert_eq!(
        classify(&a, &near, &Separation::between(&a, &near)),
        PairClass::Contact
    );
    assert_eq!(
        classify(&a, &far, &Separation::between(&a, &far)),
        PairClass::Separated
    );
}

#[test]
fn test_classify_same_id_is_never_contact() {
    let a = disc(7, 1.0, 0.0, 0.0);
    let b = disc(7, 1.0, 0.5, 0.0);

    let separation = Separation::between(&a, &b);

    assert!(separation.is_contact());
    assert_eq!(classify(&a, &b, &separation), PairClass::Separated);
}
