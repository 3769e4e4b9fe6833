//! Benchmark profiles and utilities for the Murmur agent simulation engine.
//!
//! Provides pre-built [`SystemConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 1K flocking agents in a bouncing box
//! - [`stress_profile`]: 10K flocking agents in a box 3x wider
//! - [`init_positions`]: deterministic point placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use murmur_core::{AgentSettings, DVec3};
use murmur_engine::{BoxShape, Emitter, IndexKind, SystemConfig};
use murmur_rules::{BehaviorKind, Force, ForceKind, RuleSet};
use murmur_space::{Aabb, BoxEnvironment, DEFAULT_BIN_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Settings shared by the flocking profiles.
pub fn flock_settings() -> AgentSettings {
    AgentSettings {
        lifespan: u32::MAX,
        max_speed: 1.5,
        max_force: 0.05,
        vision_radius: DEFAULT_BIN_SIZE,
        vision_angle: 300.0,
        ..AgentSettings::default()
    }
}

/// Classic boids: separation, alignment, cohesion, plus edge avoidance and
/// a bounce as the last line of defence.
pub fn flock_rules() -> RuleSet {
    RuleSet::new()
        .with_force(Force::weighted(
            ForceKind::Separation {
                vision_radius_multiplier: 0.5,
            },
            1.5,
        ))
        .with_force(ForceKind::Alignment {
            vision_radius_multiplier: 1.0,
        })
        .with_force(ForceKind::Cohesion {
            vision_radius_multiplier: 1.0,
        })
        .with_force(Force::weighted(ForceKind::AvoidEdges { vision_distance: 8.0 }, 2.0))
        .with_behavior(BehaviorKind::BounceContain)
}

/// # Panics
///
/// Panics if `half` is negative or not finite. Every caller passes a
/// positive constant.
fn flock_profile(seed: u64, agents: u32, half: f64, index: IndexKind) -> SystemConfig {
    let world = Aabb::centered(DVec3::ZERO, half * 1.2).expect("profile world half-size must be finite and >= 0");
    let spawn = Aabb::centered(DVec3::ZERO, half).expect("profile spawn half-size must be finite and >= 0");
    SystemConfig {
        settings: vec![flock_settings()],
        emitters: vec![Emitter::burst(Arc::new(BoxShape::new(spawn)), agents)],
        rules: flock_rules(),
        environment: Some(Arc::new(BoxEnvironment::new(world, false))),
        index,
        seed,
    }
}

/// Build a reference benchmark profile: 1K agents spawned in a ±50 box.
pub fn reference_profile(seed: u64) -> SystemConfig {
    flock_profile(seed, 1_000, 50.0, IndexKind::default())
}

/// Build a stress benchmark profile: 10K agents spawned in a ±150 box.
///
/// Density matches [`reference_profile`] to within a factor of three, so
/// per-agent neighbor counts stay comparable.
pub fn stress_profile(seed: u64) -> SystemConfig {
    flock_profile(seed, 10_000, 150.0, IndexKind::default())
}

/// [`reference_profile`] with the brute-force list index, for comparison.
pub fn reference_profile_list(seed: u64) -> SystemConfig {
    flock_profile(seed, 1_000, 50.0, IndexKind::List)
}

/// Generate `n` deterministic points uniform in the cube of half-width
/// `half`.
pub fn init_positions(n: usize, half: f64, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
            )
        })
        .collect()
}
