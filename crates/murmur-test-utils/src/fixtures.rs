//! Reusable agent, shape and point fixtures.
//!
//! - [`SequenceShape`]: emits a fixed list of points in a cycle.
//! - [`CountingShape`]: emits along +X, one unit further per call.
//! - [`still_settings`]: settings with no initial velocity and a long life.

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::DVec3;
use murmur_core::{Agent, AgentId, AgentSettings, EmissionShape};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Emits `points[0], points[1], ...`, wrapping around at the end.
#[derive(Debug)]
pub struct SequenceShape {
    points: Vec<DVec3>,
    cursor: AtomicUsize,
}

impl SequenceShape {
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn new(points: Vec<DVec3>) -> Self {
        assert!(!points.is_empty(), "SequenceShape needs at least one point");
        Self {
            points,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of points emitted so far.
    pub fn emitted(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl EmissionShape for SequenceShape {
    fn emit(&self, _rng: &mut dyn RngCore) -> DVec3 {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.points[i % self.points.len()]
    }
}

/// Emits `(0,0,0), (1,0,0), (2,0,0), ...`.
#[derive(Debug, Default)]
pub struct CountingShape {
    calls: AtomicUsize,
}

impl CountingShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl EmissionShape for CountingShape {
    fn emit(&self, _rng: &mut dyn RngCore) -> DVec3 {
        let i = self.calls.fetch_add(1, Ordering::Relaxed);
        DVec3::new(i as f64, 0.0, 0.0)
    }
}

/// Settings for agents that start at rest and outlive any test.
pub fn still_settings() -> AgentSettings {
    AgentSettings {
        lifespan: 10_000,
        initial_speed: 0.0,
        ..AgentSettings::default()
    }
}

/// An agent with [`still_settings`] at `position` moving at `velocity`.
pub fn agent_at(id: u64, position: DVec3, velocity: DVec3) -> Agent {
    Agent::new(AgentId(id), still_settings(), position, velocity)
}

/// `n` deterministic points uniform in the cube of half-width `half`.
pub fn scatter(n: usize, half: f64, seed: u64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            )
        })
        .collect()
}
