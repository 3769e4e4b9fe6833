//! Discrete behaviors that mutate state directly.

use murmur_core::error::{self as param, ParamError};
use murmur_core::vector::{reflect, unitize};
use murmur_core::{Agent, Environment, Segment};

/// A discrete rule run after all forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BehaviorKind {
    /// Kill every neighbor within `vision_radius * vision_radius_multiplier`.
    ///
    /// Kills are collected during evaluation and applied once every agent
    /// has been evaluated.
    Eat {
        /// Scales the agent's vision radius. A small value (or a narrow
        /// vision angle) makes a "mouth" rather than a net.
        vision_radius_multiplier: f64,
    },
    /// Reflect off the environment boundary.
    BounceContain,
    /// Teleport through a periodic environment boundary.
    Wrap,
}

impl BehaviorKind {
    /// Short stable name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eat { .. } => "eat",
            Self::BounceContain => "bounce_contain",
            Self::Wrap => "wrap",
        }
    }

    /// Check parameters against their documented domains.
    pub fn validate(&self) -> Result<(), ParamError> {
        if let Self::Eat {
            vision_radius_multiplier,
        } = *self
        {
            param::non_negative("vision_radius_multiplier", vision_radius_multiplier)?;
        }
        Ok(())
    }

    /// Multiplier on the agent's vision radius this behavior reads
    /// neighbors within, or `None` if it ignores neighbors.
    pub fn neighbor_range_multiplier(&self) -> Option<f64> {
        match *self {
            Self::Eat {
                vision_radius_multiplier,
            } => Some(vision_radius_multiplier),
            _ => None,
        }
    }

    /// Whether this behavior queries the environment.
    pub fn requires_environment(&self) -> bool {
        matches!(self, Self::BounceContain | Self::Wrap)
    }
}

/// Kill every supplied neighbor.
///
/// Returns whether any neighbor was present. The acting agent is not
/// touched; dead neighbors are removed in the owner's next cull.
pub fn eat<'a, I>(neighbors: I) -> bool
where
    I: IntoIterator<Item = &'a mut Agent>,
{
    let mut ate = false;
    for prey in neighbors {
        prey.die();
        ate = true;
    }
    ate
}

/// Reflect the velocity off the boundary ahead.
///
/// The feeler runs along the heading for `max(body_size, speed)`, so a
/// fast agent cannot skip over the wall in one step. On a crossing the
/// velocity becomes `v - 2(v·n)n` and `true` is returned; otherwise the
/// velocity is unchanged.
///
/// An agent already outside (pushed there by forces) is moved back to the
/// closest point of the environment, and its velocity is reflected off the
/// closest normal if still heading outward.
pub fn bounce_contain(agent: &mut Agent, environment: &dyn Environment) -> bool {
    let v = agent.velocity();
    let p = agent.position();
    if !environment.contains(p) {
        let normal = environment.closest_normal(p);
        agent.set_position(environment.closest_point(p));
        if v.dot(normal) > 0.0 {
            agent.set_velocity(reflect(v, normal));
        }
        return true;
    }
    let reach = agent.body_size().max(v.length());
    let probe = Segment::new(agent.position(), agent.position() + unitize(v) * reach);
    match environment.boundary_crossing(&probe) {
        Some(hit) => {
            agent.set_velocity(reflect(v, hit.normal));
            true
        }
        None => false,
    }
}

/// Move the agent to its wrapped position if that differs.
pub fn wrap(agent: &mut Agent, environment: &dyn Environment) -> bool {
    let p = agent.position();
    let wrapped = environment.wrap_position(p);
    if wrapped != p {
        agent.set_position(wrapped);
        true
    } else {
        false
    }
}
