//! The [`Agent`] entity and its [`AgentSettings`] template.
//!
//! Settings are plain `Copy` values compared by value; emitters clone them
//! into every agent they spawn. Agents carry identity through their
//! [`AgentId`] and own all mutable simulation state.

use glam::DVec3;
use rand::Rng;

use crate::error::{self, ParamError};
use crate::history::PositionHistory;
use crate::id::AgentId;

// ── Defaults ───────────────────────────────────────────────────

/// Default number of steps an agent lives.
pub const DEFAULT_LIFESPAN: u32 = 30;
/// Default agent mass.
pub const DEFAULT_MASS: f64 = 1.0;
/// Default body size (sensor offset and bounce feeler length).
pub const DEFAULT_BODY_SIZE: f64 = 1.0;
/// Default maximum desired speed.
pub const DEFAULT_MAX_SPEED: f64 = 1.0;
/// Default maximum steering force.
pub const DEFAULT_MAX_FORCE: f64 = 0.1;
/// Default absolute vision radius.
pub const DEFAULT_VISION_RADIUS: f64 = 5.0;
/// Default field of view in degrees (full sphere).
pub const DEFAULT_VISION_ANGLE: f64 = 360.0;
/// Default number of retained positions.
pub const DEFAULT_HISTORY_LENGTH: usize = 1;
/// Default bound on each component of the initial random velocity.
pub const DEFAULT_INITIAL_SPEED: f64 = 1.0;

// ── AgentSettings ──────────────────────────────────────────────

/// Immutable per-agent parameters, cloned from a template at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSettings {
    /// Steps the agent lives before dying of old age. Zero spawns an
    /// agent that is culled in its first step without acting.
    pub lifespan: u32,
    /// Divisor applied to every force. Must be > 0.
    pub mass: f64,
    /// Physical size; sensor offset and feeler length. Must be ≥ 0.
    pub body_size: f64,
    /// Speed steering forces aim for. Must be ≥ 0.
    pub max_speed: f64,
    /// Magnitude cap on each steering force. Must be ≥ 0.
    pub max_force: f64,
    /// Absolute neighbor perception radius. Must be ≥ 0.
    pub vision_radius: f64,
    /// Field of view in degrees, in `[0, 360]`.
    pub vision_angle: f64,
    /// Capacity of the position history ring. Must be ≥ 1.
    pub history_length: usize,
    /// Each initial velocity component is drawn from
    /// `[-initial_speed, initial_speed]`. Must be ≥ 0.
    pub initial_speed: f64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            lifespan: DEFAULT_LIFESPAN,
            mass: DEFAULT_MASS,
            body_size: DEFAULT_BODY_SIZE,
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
            vision_radius: DEFAULT_VISION_RADIUS,
            vision_angle: DEFAULT_VISION_ANGLE,
            history_length: DEFAULT_HISTORY_LENGTH,
            initial_speed: DEFAULT_INITIAL_SPEED,
        }
    }
}

impl AgentSettings {
    /// Check every parameter against its documented domain.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.history_length == 0 {
            return Err(ParamError::Zero {
                name: "history_length",
            });
        }
        error::positive("mass", self.mass)?;
        error::non_negative("body_size", self.body_size)?;
        error::non_negative("max_speed", self.max_speed)?;
        error::non_negative("max_force", self.max_force)?;
        error::non_negative("vision_radius", self.vision_radius)?;
        error::in_range("vision_angle", self.vision_angle, 0.0, 360.0)?;
        error::non_negative("initial_speed", self.initial_speed)?;
        Ok(())
    }
}

// ── Agent ──────────────────────────────────────────────────────

/// A simulated moving entity.
///
/// Two states only: alive while `lifespan > 0`, dead once it reaches
/// zero. Death is terminal; the owning system removes dead agents in its
/// cull phase.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    settings: AgentSettings,
    lifespan: u32,
    position: DVec3,
    velocity: DVec3,
    acceleration: DVec3,
    history: PositionHistory,
}

impl Agent {
    /// Build an agent with an explicit initial velocity.
    pub fn new(id: AgentId, settings: AgentSettings, position: DVec3, velocity: DVec3) -> Self {
        let mut history = PositionHistory::new(settings.history_length);
        history.push(position);
        Self {
            id,
            settings,
            lifespan: settings.lifespan,
            position,
            velocity,
            acceleration: DVec3::ZERO,
            history,
        }
    }

    /// Build an agent whose velocity components are drawn uniformly from
    /// `[-initial_speed, initial_speed]`.
    ///
    /// This is the only randomness in an agent's life.
    pub fn spawn<R: Rng + ?Sized>(
        id: AgentId,
        settings: AgentSettings,
        position: DVec3,
        rng: &mut R,
    ) -> Self {
        let s = settings.initial_speed;
        let velocity = if s > 0.0 {
            DVec3::new(
                rng.random_range(-s..=s),
                rng.random_range(-s..=s),
                rng.random_range(-s..=s),
            )
        } else {
            DVec3::ZERO
        };
        Self::new(id, settings, position, velocity)
    }

    /// Stable identity of this agent.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The template this agent was cloned from.
    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Remaining steps to live.
    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Current position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Acceleration accumulated since the last integration.
    pub fn acceleration(&self) -> DVec3 {
        self.acceleration
    }

    /// Past positions, oldest first.
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Shorthand for `settings().mass`.
    pub fn mass(&self) -> f64 {
        self.settings.mass
    }

    /// Shorthand for `settings().body_size`.
    pub fn body_size(&self) -> f64 {
        self.settings.body_size
    }

    /// Shorthand for `settings().max_speed`.
    pub fn max_speed(&self) -> f64 {
        self.settings.max_speed
    }

    /// Shorthand for `settings().max_force`.
    pub fn max_force(&self) -> f64 {
        self.settings.max_force
    }

    /// Shorthand for `settings().vision_radius`.
    pub fn vision_radius(&self) -> f64 {
        self.settings.vision_radius
    }

    /// Whether the agent is still alive.
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0
    }

    /// Whether the agent has died.
    pub fn is_dead(&self) -> bool {
        self.lifespan == 0
    }

    /// Overwrite the velocity (bounce and similar behaviors).
    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    /// Teleport the agent (wrap behavior). History is not touched.
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Accumulate `force / mass` into the acceleration.
    pub fn apply_force(&mut self, force: DVec3) {
        self.acceleration += force / self.settings.mass;
    }

    /// Advance one step.
    ///
    /// `velocity += acceleration; position += velocity`, then the
    /// acceleration is cleared and the lifespan drops by one (saturating).
    /// Speed is not clamped here.
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = DVec3::ZERO;
        self.lifespan = self.lifespan.saturating_sub(1);
        self.history.push(self.position);
    }

    /// Mark the agent dead. Removal happens in the owner's cull phase.
    pub fn die(&mut self) {
        self.lifespan = 0;
    }
}
