//! Force kinds and their parameter sets.
//!
//! Each [`ForceKind`] variant is one steering function from
//! [`steering`](crate::steering) or [`vehicle`](crate::vehicle) plus the
//! parameters it needs. A [`Force`] pairs a kind with a weight.

use glam::DVec3;
use murmur_core::error::{self as param, ParamError};
use murmur_core::{Agent, Environment};

use crate::neighbor::Neighbor;
use crate::{steering, vehicle};

/// Default force weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Default neighbor-range multiplier for flocking forces.
pub const DEFAULT_VISION_RADIUS_MULTIPLIER: f64 = 1.0;
/// Default vehicle wheel radius.
pub const DEFAULT_WHEEL_RADIUS: f64 = 1.0;

/// A steering force and its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceKind {
    /// Head for a fixed point at full speed.
    Seek {
        /// Point to seek.
        target: DVec3,
    },
    /// Head for a fixed point, slowing down inside `arrival_radius`.
    Arrive {
        /// Point to arrive at.
        target: DVec3,
        /// Distance at which slowing starts. Zero disables slowing.
        arrival_radius: f64,
    },
    /// Move towards the mean position of neighbors.
    Cohesion {
        /// Scales the agent's vision radius.
        vision_radius_multiplier: f64,
    },
    /// Move away from neighbors, closer ones weighted more.
    Separation {
        /// Scales the agent's vision radius.
        vision_radius_multiplier: f64,
    },
    /// Match the mean heading of neighbors.
    Alignment {
        /// Scales the agent's vision radius.
        vision_radius_multiplier: f64,
    },
    /// Inverse-square pull towards a point mass.
    Attraction {
        /// Position of the attracting mass.
        target: DVec3,
        /// Attracting mass. Must be > 0.
        mass: f64,
        /// Distance floor in the inverse-square law. Must be > 0.
        distance_lower_limit: f64,
        /// Distance ceiling. Must be ≥ the floor.
        distance_upper_limit: f64,
    },
    /// Braitenberg vehicle reacting to a point stimulus.
    SensePoint {
        /// Stimulus position.
        source: DVec3,
        /// Distance mapped to a sensor reading of 1. Must be > 0.
        radius: f64,
        /// Wheel radius scaling the turn. Must be ≥ 0.
        wheel_radius: f64,
        /// Whether each sensor drives the opposite wheel.
        crossed: bool,
    },
    /// Turn away from the environment boundary ahead.
    AvoidEdges {
        /// Feeler length. Must be > 0.
        vision_distance: f64,
    },
}

impl ForceKind {
    /// Short stable name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seek { .. } => "seek",
            Self::Arrive { .. } => "arrive",
            Self::Cohesion { .. } => "cohesion",
            Self::Separation { .. } => "separation",
            Self::Alignment { .. } => "alignment",
            Self::Attraction { .. } => "attraction",
            Self::SensePoint { .. } => "sense_point",
            Self::AvoidEdges { .. } => "avoid_edges",
        }
    }

    /// Check parameters against their documented domains.
    pub fn validate(&self) -> Result<(), ParamError> {
        match *self {
            Self::Seek { target } => {
                param::finite_vec("target", target)?;
            }
            Self::Arrive {
                target,
                arrival_radius,
            } => {
                param::finite_vec("target", target)?;
                param::non_negative("arrival_radius", arrival_radius)?;
            }
            Self::Cohesion {
                vision_radius_multiplier,
            }
            | Self::Separation {
                vision_radius_multiplier,
            }
            | Self::Alignment {
                vision_radius_multiplier,
            } => {
                param::non_negative("vision_radius_multiplier", vision_radius_multiplier)?;
            }
            Self::Attraction {
                target,
                mass,
                distance_lower_limit,
                distance_upper_limit,
            } => {
                param::finite_vec("target", target)?;
                param::positive("mass", mass)?;
                param::positive("distance_lower_limit", distance_lower_limit)?;
                param::positive("distance_upper_limit", distance_upper_limit)?;
                if distance_upper_limit < distance_lower_limit {
                    return Err(ParamError::Inconsistent {
                        reason: format!(
                            "distance_upper_limit {distance_upper_limit} is below distance_lower_limit {distance_lower_limit}"
                        ),
                    });
                }
            }
            Self::SensePoint {
                source,
                radius,
                wheel_radius,
                ..
            } => {
                param::finite_vec("source", source)?;
                param::positive("radius", radius)?;
                param::non_negative("wheel_radius", wheel_radius)?;
            }
            Self::AvoidEdges { vision_distance } => {
                param::positive("vision_distance", vision_distance)?;
            }
        }
        Ok(())
    }

    /// Multiplier on the agent's vision radius this force reads neighbors
    /// within, or `None` if it ignores neighbors.
    pub fn neighbor_range_multiplier(&self) -> Option<f64> {
        match *self {
            Self::Cohesion {
                vision_radius_multiplier,
            }
            | Self::Separation {
                vision_radius_multiplier,
            }
            | Self::Alignment {
                vision_radius_multiplier,
            } => Some(vision_radius_multiplier),
            _ => None,
        }
    }

    /// Whether this force queries the environment.
    pub fn requires_environment(&self) -> bool {
        matches!(self, Self::AvoidEdges { .. })
    }

    /// Unweighted force on `agent`.
    ///
    /// Fixed targets and stimulus sources are first projected through
    /// [`Environment::map_to_2d`] so agents on a surface steer towards the
    /// point on that surface. Environment-driven kinds produce zero force
    /// when `environment` is `None`.
    pub fn compute(&self, agent: &Agent, neighbors: &[Neighbor], environment: Option<&dyn Environment>) -> DVec3 {
        let project = |point: DVec3| environment.map_or(point, |env| env.map_to_2d(point));
        match *self {
            Self::Seek { target } => steering::seek(agent, project(target)),
            Self::Arrive {
                target,
                arrival_radius,
            } => steering::arrive(agent, project(target), arrival_radius),
            Self::Cohesion {
                vision_radius_multiplier,
            } => steering::cohesion(agent, neighbors, vision_radius_multiplier),
            Self::Separation {
                vision_radius_multiplier,
            } => steering::separation(agent, neighbors, vision_radius_multiplier),
            Self::Alignment {
                vision_radius_multiplier,
            } => steering::alignment(agent, neighbors, vision_radius_multiplier),
            Self::Attraction {
                target,
                mass,
                distance_lower_limit,
                distance_upper_limit,
            } => steering::attraction(agent, project(target), mass, distance_lower_limit, distance_upper_limit),
            Self::SensePoint {
                source,
                radius,
                wheel_radius,
                crossed,
            } => vehicle::sense_point(agent, project(source), radius, wheel_radius, crossed).force,
            Self::AvoidEdges { vision_distance } => environment
                .map(|env| steering::avoid_edges(agent, env, vision_distance))
                .unwrap_or(DVec3::ZERO),
        }
    }
}

/// A force kind with a weight multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Force {
    /// What to compute.
    pub kind: ForceKind,
    /// Multiplier on the computed force. Must be ≥ 0; vehicle forces are
    /// further restricted to `[0, 1]`.
    pub weight: f64,
}

impl Force {
    /// A force with [`DEFAULT_WEIGHT`].
    pub fn new(kind: ForceKind) -> Self {
        Self {
            kind,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// A force with an explicit weight.
    pub fn weighted(kind: ForceKind, weight: f64) -> Self {
        Self { kind, weight }
    }

    /// Check the kind's parameters and the weight.
    pub fn validate(&self) -> Result<(), ParamError> {
        match self.kind {
            ForceKind::SensePoint { .. } => param::in_range("weight", self.weight, 0.0, 1.0)?,
            _ => param::non_negative("weight", self.weight)?,
        };
        self.kind.validate()
    }

    /// Weighted force on `agent`.
    pub fn evaluate(&self, agent: &Agent, neighbors: &[Neighbor], environment: Option<&dyn Environment>) -> DVec3 {
        self.kind.compute(agent, neighbors, environment) * self.weight
    }
}

impl From<ForceKind> for Force {
    fn from(kind: ForceKind) -> Self {
        Self::new(kind)
    }
}
