//! Merges, bounces and walls
//!
//! Drops a cloud of bodies into a box twice: once with merging collisions,
//! once with elastic bounces, and prints what the step reports say.
//!
//! Run with: cargo run --package bodysim --example collision_demo

use bodysim::body::Body;
use bodysim::boundary::Boundary;
use bodysim::config::SimConfig;
use bodysim::step::step;
use bodysim::store::BodyStore;

fn cloud() -> BodyStore {
    let mut store = BodyStore::new();
    for i in 0..6 {
        for j in 0..6 {
            let x = 100.0 + f64::from(i) * 40.0;
            let y = 100.0 + f64::from(j) * 40.0;
            let vx = f64::from((i * 7 + j * 3) % 5) - 2.0;
            let vy = f64::from((i * 3 + j * 5) % 5) - 2.0;
            store.insert(Body::with_mass(50.0 + f64::from(i * j), [x, y], [vx, vy]));
        }
    }
    store
}

fn run(label: &str, config: &SimConfig) {
    let mut store = cloud();
    let initial = store.len();
    let initial_mass = store.total_mass();
    let initial_energy = store.kinetic_energy();

    let mut merges = 0;
    let mut bounces = 0;
    let mut wall_hits = 0;

    for _ in 0..2_000 {
        let report = step(&mut store, config);
        for merge in &report.merges {
            println!("    {:?} absorbed {:?}", merge.survivor, merge.absorbed);
        }
        merges += report.merges.len();
        bounces += report.bounces;
        wall_hits += report.boundary_hits;
    }

    println!("\n{label}:");
    println!("  Bodies: {} -> {}", initial, store.len());
    println!("  Merges: {merges}, bounces: {bounces}, wall hits: {wall_hits}");
    println!(
        "  Total mass: {:.3} -> {:.3}",
        initial_mass,
        store.total_mass()
    );
    println!(
        "  Kinetic energy: {:.3} -> {:.3}",
        initial_energy,
        store.kinetic_energy()
    );
    if let Some(center) = store.center_of_mass() {
        println!("  Center of mass: ({:.2}, {:.2})", center.x, center.y);
    }
}

fn main() {
    println!("Collision Demo: 36 bodies in a 400x400 box");
    println!("{}", "=".repeat(60));

    let walls = Boundary::new(400.0, 400.0);

    run(
        "Merging under gravity",
        &SimConfig::default()
            .with_gravity(0.5)
            .with_merging()
            .with_boundary(walls.clone()),
    );

    run(
        "Elastic bounces, no gravity",
        &SimConfig::inert()
            .with_bouncing(1.0)
            .with_boundary(walls),
    );

    println!("\n{}", "=".repeat(60));
    println!("Demo complete!");
}
