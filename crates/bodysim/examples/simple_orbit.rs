//! Single planet around a pinned sun
//!
//! Demonstrates gravity with an immovable body and how well semi-implicit
//! Euler keeps a circular orbit over one period.
//!
//! Run with: cargo run --package bodysim --example simple_orbit

use std::f64::consts::PI;

use bodysim::body::Body;
use bodysim::config::SimConfig;
use bodysim::forces::gravity::potential_energy;
use bodysim::step::step;
use bodysim::store::BodyStore;

fn main() {
    println!("Simple Orbit Demo: planet around a pinned sun\n");
    println!("{}", "=".repeat(60));

    let g: f64 = 1.0;
    let sun_mass = 1000.0;
    let r = 150.0;
    let v = (g * sun_mass / r).sqrt();

    let mut store = BodyStore::new();
    store.insert(
        Body::builder()
            .mass(sun_mass)
            .radius(0.0)
            .immovable(true)
            .color("yellow")
            .build(),
    );
    let planet = store.insert(Body::with_mass(1.0, [r, 0.0], [0.0, v]));

    let dt = 0.1;
    let period = 2.0 * PI * r / v;
    let steps = (period / dt) as usize;
    let config = SimConfig::default().with_gravity(g).with_timestep(dt);

    println!("\nInitial conditions:");
    println!("  Orbit radius: {:.1}", r);
    println!("  Circular velocity: {:.4}", v);
    println!("  Period: {:.1} ({} steps of {})", period, steps, dt);

    let energy = |store: &BodyStore| store.kinetic_energy() + potential_energy(store, g);
    let initial_energy = energy(&store);

    for i in 0..steps {
        step(&mut store, &config);

        if i % (steps / 8).max(1) != 0 {
            continue;
        }
        if let Some(body) = store.get_by_id(planet) {
            println!(
                "  step {:5}: pos=({:8.2}, {:8.2}) r={:.3}",
                i,
                body.position.x,
                body.position.y,
                body.position.coords.magnitude()
            );
        }
    }

    let final_energy = energy(&store);
    println!("\n{}", "=".repeat(60));
    println!("After one period:");
    if let Some(body) = store.get_by_id(planet) {
        println!("  Position: ({:.3}, {:.3})", body.position.x, body.position.y);
        println!("  Radius drift: {:.4}", body.position.coords.magnitude() - r);
    }
    println!(
        "  Relative energy error: {:.2e}",
        ((final_energy - initial_energy) / initial_energy).abs()
    );
}
