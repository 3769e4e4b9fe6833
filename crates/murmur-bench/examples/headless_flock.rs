//! Headless flocking run.
//!
//! Demonstrates: build configs → AgentSystem → Engine → run → read metrics →
//! reset → run again. Set `RUST_LOG=debug` for per-step summaries.

use std::sync::Arc;

use murmur_bench::{flock_settings, reference_profile};
use murmur_core::{AgentSettings, DVec3};
use murmur_engine::{AgentSystem, Emitter, Engine, PointShape, SystemConfig};
use murmur_rules::{BehaviorKind, ForceKind, RuleSet};
use murmur_space::{Aabb, BoxEnvironment};

fn main() {
    env_logger::init();
    println!("=== Murmur Headless Flock Example ===\n");

    let flock = AgentSystem::new(reference_profile(42)).unwrap();

    // A trickle of short-lived agents circling a fixed attractor.
    let world = Arc::new(BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 60.0).unwrap(), true));
    let orbiters = AgentSystem::new(SystemConfig {
        settings: vec![AgentSettings {
            lifespan: 150,
            ..flock_settings()
        }],
        emitters: vec![Emitter::continuous(Arc::new(PointShape(DVec3::new(30.0, 0.0, 0.0))), 3, 50)],
        rules: RuleSet::new()
            .with_force(ForceKind::Attraction {
                target: DVec3::ZERO,
                mass: 2.0,
                distance_lower_limit: 2.0,
                distance_upper_limit: 40.0,
            })
            .with_behavior(BehaviorKind::Wrap),
        environment: Some(world),
        ..SystemConfig::default()
    })
    .unwrap();

    let mut engine = Engine::new();
    engine.add_system(flock);
    engine.add_system(orbiters);

    println!("Episode 1: 200 steps");
    for step in 0..200 {
        let metrics = engine.run(false).unwrap();
        if step % 50 == 0 || step == 199 {
            let total_us: u64 = metrics.iter().map(|m| m.total_us).sum();
            println!(
                "  step {:>3}: flock={:>5}, orbiters={:>3}, neighbors={:>7}, time={:>6}μs",
                step + 1,
                metrics[0].live,
                metrics[1].live,
                metrics[0].neighbors_seen,
                total_us,
            );
        }
    }

    log::info!("resetting all systems");
    engine.run(true).unwrap();
    println!("\nAfter reset: {} agents", engine.agent_count());

    println!("Episode 2: 50 steps");
    for _ in 0..50 {
        engine.run(false).unwrap();
    }
    let centroid = engine.system(0).map(|s| s.positions().sum::<DVec3>() / s.len().max(1) as f64);
    println!("  flock centroid after 50 steps: {centroid:?}");
    println!("\nDone.");
}
