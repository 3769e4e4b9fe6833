//! Emitters and the reference emission shapes.
//!
//! An [`Emitter`] decides *when* agents appear; its [`EmissionShape`]
//! decides *where*.

use std::sync::Arc;

use glam::DVec3;
use murmur_core::{EmissionShape, ParamError, StepId};
use murmur_space::Aabb;
use rand::{Rng, RngCore};

/// Source of new agents.
///
/// A continuous emitter spawns one agent every `creation_rate` steps while
/// the system's live population is below `num_agents` (`0` means no cap).
/// A burst emitter spawns exactly `num_agents` agents at reset and nothing
/// afterwards.
#[derive(Clone, Debug)]
pub struct Emitter {
    /// Where agents appear.
    pub shape: Arc<dyn EmissionShape>,
    /// Continuous flow (`true`) or a single burst at reset (`false`).
    pub continuous_flow: bool,
    /// Steps between continuous spawns. Must be at least 1.
    pub creation_rate: u32,
    /// Population cap (continuous) or burst size.
    pub num_agents: u32,
}

impl Emitter {
    /// A continuous emitter spawning every `creation_rate` steps up to a
    /// live population of `num_agents`.
    pub fn continuous(shape: Arc<dyn EmissionShape>, creation_rate: u32, num_agents: u32) -> Self {
        Self {
            shape,
            continuous_flow: true,
            creation_rate,
            num_agents,
        }
    }

    /// A burst emitter spawning `num_agents` at reset.
    pub fn burst(shape: Arc<dyn EmissionShape>, num_agents: u32) -> Self {
        Self {
            shape,
            continuous_flow: false,
            creation_rate: 1,
            num_agents,
        }
    }

    /// Check that `creation_rate` is non-zero.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.creation_rate == 0 {
            return Err(ParamError::Zero {
                name: "creation_rate",
            });
        }
        Ok(())
    }

    /// Whether this emitter spawns at `step` given the current population.
    ///
    /// Always `false` for burst emitters.
    pub fn should_spawn(&self, step: StepId, live: usize) -> bool {
        self.continuous_flow
            && self.creation_rate > 0
            && step.0 % u64::from(self.creation_rate) == 0
            && (self.num_agents == 0 || live < self.num_agents as usize)
    }

    /// Draw one emission point.
    pub fn emit(&self, rng: &mut dyn RngCore) -> DVec3 {
        self.shape.emit(rng)
    }
}

// ── Shapes ──────────────────────────────────────────────────────

/// Emits the same point every time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointShape(pub DVec3);

impl EmissionShape for PointShape {
    fn emit(&self, _rng: &mut dyn RngCore) -> DVec3 {
        self.0
    }
}

/// Emits points uniformly inside an axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    bounds: Aabb,
}

impl BoxShape {
    /// Uniform emission inside `bounds`, faces included.
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }

    /// The emission volume.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl EmissionShape for BoxShape {
    fn emit(&self, rng: &mut dyn RngCore) -> DVec3 {
        let (lo, hi) = (self.bounds.min(), self.bounds.max());
        DVec3::new(
            rng.random_range(lo.x..=hi.x),
            rng.random_range(lo.y..=hi.y),
            rng.random_range(lo.z..=hi.z),
        )
    }
}
