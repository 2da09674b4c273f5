use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::body::{AxisLock, Body, BodyId, radius_from_mass};
use crate::collisions::resolution::*;
use crate::config::SimConfig;

fn body(id: u32, mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Body {
    let mut body = Body::with_mass(mass, position, velocity);
    body.id = BodyId(id);
    body
}

fn momentum(a: &Body, b: &Body) -> Vector2<f64> {
    a.momentum() + b.momentum()
}

#[test]
fn test_response_from_config() {
    assert_eq!(
        CollisionResponse::from_config(&SimConfig::default().with_merging()),
        CollisionResponse::Merge
    );
    assert_eq!(
        CollisionResponse::from_config(&SimConfig::default().with_bouncing(0.5)),
        CollisionResponse::Bounce { restitution: 0.5 }
    );
}

#[test]
fn test_larger_is_heavier_body() {
    let light = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let heavy = body(1, 2.0, [1.0, 0.0], [0.0, 0.0]);

    assert!(!first_is_larger(&light, &heavy));
    assert!(first_is_larger(&heavy, &light));
}

#[test]
fn test_larger_tie_goes_to_second() {
    let a = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let b = body(1, 1.0, [1.0, 0.0], [0.0, 0.0]);

    assert!(!first_is_larger(&a, &b));
}

#[test]
fn test_larger_is_immovable_regardless_of_mass() {
    let mut anchor = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    anchor.immovable = true;
    let heavy = body(1, 1000.0, [1.0, 0.0], [0.0, 0.0]);

    assert!(first_is_larger(&anchor, &heavy));
    assert!(!first_is_larger(&heavy, &anchor));
}

#[test]
fn test_merge_keeps_survivor_acceleration() {
    let mut a = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 3.0, [1.0, 0.0], [0.0, 0.0]);
    a.acceleration = Vector2::new(4.0, 0.0);
    b.acceleration = Vector2::new(0.0, -2.0);

    merge(&mut a, &mut b);

    assert_eq!(b.acceleration, Vector2::new(0.0, -2.0));
}

#[test]
fn test_merge_conserves_mass_and_charge() {
    let mut a = body(0, 2.0, [0.0, 0.0], [1.0, 0.0]);
    let mut b = body(1, 3.0, [1.0, 0.0], [0.0, 1.0]);
    a.charge = -1.5;
    b.charge = 4.0;

    let absorbed = merge(&mut a, &mut b);

    assert_eq!(absorbed, Side::First);
    assert_eq!(b.mass, 5.0);
    assert_eq!(b.charge, 2.5);
}

#[test]
fn test_merge_conserves_momentum() {
    let mut a = body(0, 1.0, [1.0, 0.0], [0.0, 5.0]);
    let mut b = body(1, 2.0, [1.1, 0.0], [0.0, 3.0]);
    let initial = momentum(&a, &b);

    merge(&mut a, &mut b);

    assert_relative_eq!(b.momentum().x, initial.x, epsilon = 1e-12);
    assert_relative_eq!(b.momentum().y, initial.y, epsilon = 1e-12);
}

#[test]
fn test_merge_moves_to_center_of_mass() {
    let mut a = body(0, 3.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 1.0, [4.0, 8.0], [0.0, 0.0]);

    let absorbed = merge(&mut a, &mut b);

    assert_eq!(absorbed, Side::Second);
    assert_relative_eq!(a.position.x, 1.0);
    assert_relative_eq!(a.position.y, 2.0);
}

#[test]
fn test_merge_recomputes_derived_radius() {
    let mut a = body(0, 100.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 50.0, [1.0, 0.0], [0.0, 0.0]);

    merge(&mut a, &mut b);

    assert_eq!(a.radius, radius_from_mass(150.0));
}

#[test]
fn test_merge_keeps_hand_set_radius() {
    let mut a = Body::builder().id(BodyId(0)).mass(100.0).radius(40.0).build();
    let mut b = body(1, 50.0, [1.0, 0.0], [0.0, 0.0]);

    merge(&mut a, &mut b);

    assert_eq!(a.mass, 150.0);
    assert_eq!(a.radius, 40.0);
}

#[test]
fn test_merge_into_immovable_keeps_it_in_place() {
    let mut anchor = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    anchor.immovable = true;
    let mut rock = body(1, 10.0, [3.0, 0.0], [-2.0, 0.0]);

    let absorbed = merge(&mut anchor, &mut rock);

    assert_eq!(absorbed, Side::Second);
    assert_eq!(anchor.position.x, 0.0);
    assert_eq!(anchor.velocity, Vector2::zeros());
    assert_eq!(anchor.mass, 11.0);
}

#[test]
fn test_resolve_reports_absorbed_side() {
    let mut a = body(0, 5.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 1.0, [1.0, 0.0], [0.0, 0.0]);

    let outcome = resolve(&mut a, &mut b, CollisionResponse::Merge);

    assert_eq!(
        outcome,
        CollisionOutcome::Merged {
            absorbed: Side::Second
        }
    );
}

#[test]
fn test_elastic_equal_masses_head_on_swap_velocities() {
    let mut a = body(0, 1.0, [0.0, 0.0], [1.0, 0.0]);
    let mut b = body(1, 1.0, [1.0, 0.0], [-1.0, 0.0]);

    bounce(&mut a, &mut b, 1.0);

    assert_relative_eq!(a.velocity.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(a.velocity.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_elastic_bounce_swaps_normal_keeps_tangent() {
    // Normal along +x; tangential components must survive
    let mut a = body(0, 1.0, [0.0, 0.0], [2.0, 1.0]);
    let mut b = body(1, 1.0, [1.0, 0.0], [-0.5, -3.0]);

    bounce(&mut a, &mut b, 1.0);

    assert_relative_eq!(a.velocity.x, -0.5, epsilon = 1e-12);
    assert_relative_eq!(a.velocity.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.y, -3.0, epsilon = 1e-12);
}

#[test]
fn test_elastic_bounce_conserves_momentum_and_energy() {
    let mut a = body(0, 3.0, [0.0, 0.0], [1.5, -0.5]);
    let mut b = body(1, 2.0, [1.0, 0.7], [-1.0, 0.25]);

    let initial_momentum = momentum(&a, &b);
    let initial_energy = a.kinetic_energy() + b.kinetic_energy();

    bounce(&mut a, &mut b, 1.0);

    let final_momentum = momentum(&a, &b);
    let final_energy = a.kinetic_energy() + b.kinetic_energy();

    assert_relative_eq!(final_momentum.x, initial_momentum.x, epsilon = 1e-10);
    assert_relative_eq!(final_momentum.y, initial_momentum.y, epsilon = 1e-10);
    assert_relative_eq!(final_energy, initial_energy, epsilon = 1e-10);
}

#[test]
fn test_zero_restitution_leaves_center_of_mass_velocity() {
    let mut a = body(0, 1.0, [0.0, 0.0], [4.0, 0.0]);
    let mut b = body(1, 3.0, [1.0, 0.0], [0.0, 0.0]);
    let center = momentum(&a, &b) / 4.0;

    bounce(&mut a, &mut b, 0.0);

    assert_relative_eq!(a.velocity.x, center.x, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.x, center.x, epsilon = 1e-12);
}

#[test]
fn test_bounce_off_immovable_reflects_normal_velocity() {
    let mut wall = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    wall.immovable = true;
    let mut ball = body(1, 1.0, [1.0, 0.0], [-2.0, 0.0]);

    bounce(&mut wall, &mut ball, 1.0);

    assert_eq!(wall.velocity, Vector2::zeros());
    assert_eq!(wall.position.x, 0.0);
    // Center-of-mass velocity includes the wall's mass, CoR 1 cancels it out
    assert_relative_eq!(ball.velocity.x, 2.0, epsilon = 1e-12);
}

#[test]
fn test_bounce_separates_comparable_masses() {
    let mut a = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 1.5, [0.5, 0.0], [0.0, 0.0]);
    let reach = a.radius + b.radius;

    bounce(&mut a, &mut b, 1.0);

    // b is larger and pushed out by its radius, a by 1.1× its radius
    assert!(b.position.x - a.position.x >= reach);
}

#[test]
fn test_bounce_only_moves_smaller_when_much_lighter() {
    let mut a = body(0, 1.0, [0.5, 0.0], [0.0, 0.0]);
    let mut b = body(1, 10.0, [0.0, 0.0], [0.0, 0.0]);

    bounce(&mut a, &mut b, 1.0);

    assert_eq!(b.position.x, 0.0);
    assert_relative_eq!(a.position.x, a.radius + b.radius, epsilon = 1e-12);
}

#[test]
fn test_bounce_never_moves_two_immovable_bodies() {
    let mut a = body(0, 1.0, [0.0, 0.0], [0.0, 0.0]);
    let mut b = body(1, 1.0, [0.5, 0.0], [0.0, 0.0]);
    a.immovable = true;
    b.immovable = true;

    bounce(&mut a, &mut b, 1.0);

    assert_eq!(a.position.x, 0.0);
    assert_eq!(b.position.x, 0.5);
}

#[test]
fn test_y_lock_keeps_vertical_velocity() {
    let mut a = body(0, 1.0, [0.0, 0.0], [0.0, 1.0]);
    let mut b = body(1, 1.0, [0.0, 1.0], [0.0, -1.0]);
    a.lock = AxisLock::Y;

    bounce(&mut a, &mut b, 1.0);

    assert_eq!(a.velocity.y, 1.0);
    assert_relative_eq!(b.velocity.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_x_lock_has_no_effect() {
    let mut a = body(0, 1.0, [0.0, 0.0], [1.0, 0.0]);
    let mut b = body(1, 1.0, [1.0, 0.0], [-1.0, 0.0]);
    a.lock = AxisLock::X;

    bounce(&mut a, &mut b, 1.0);

    assert_relative_eq!(a.velocity.x, -1.0, epsilon = 1e-12);
}
