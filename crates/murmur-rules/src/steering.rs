//! Pure steering functions.
//!
//! Every function reads the agent and its neighbors (or an environment)
//! and returns an unweighted force. None of them mutate anything. Shared
//! edge policy:
//!
//! - no neighbors in range → zero force
//! - a zero-length direction → zero force, never NaN
//! - parameters are assumed valid (see [`ForceKind::validate`](crate::ForceKind::validate))

use glam::DVec3;
use murmur_core::vector::{limit, map_range, reject_from, unitize};
use murmur_core::{Agent, Environment, Segment};

use crate::neighbor::{within, Neighbor};

/// Reynolds steering: `limit(desired - velocity, max_force)`.
pub fn steer(agent: &Agent, desired: DVec3) -> DVec3 {
    limit(desired - agent.velocity(), agent.max_force())
}

/// Steer towards `direction` at full speed; zero direction → zero force.
fn steer_along(agent: &Agent, direction: DVec3) -> DVec3 {
    let dir = unitize(direction);
    if dir == DVec3::ZERO {
        return DVec3::ZERO;
    }
    steer(agent, dir * agent.max_speed())
}

/// Head for `target` at `max_speed`.
pub fn seek(agent: &Agent, target: DVec3) -> DVec3 {
    steer_along(agent, target - agent.position())
}

/// Seek that slows down linearly inside `arrival_radius`.
///
/// At distance `d < arrival_radius` the desired speed is
/// `max_speed * d / arrival_radius`, so an agent sitting on the target
/// brakes. A radius of zero is plain [`seek`].
pub fn arrive(agent: &Agent, target: DVec3, arrival_radius: f64) -> DVec3 {
    if arrival_radius <= 0.0 {
        return seek(agent, target);
    }
    let offset = target - agent.position();
    let d = offset.length();
    let speed = if d < arrival_radius {
        map_range(d, 0.0, arrival_radius, 0.0, agent.max_speed(), true)
    } else {
        agent.max_speed()
    };
    steer(agent, unitize(offset) * speed)
}

/// Seek the mean position of neighbors within
/// `vision_radius * vision_radius_multiplier`.
pub fn cohesion(agent: &Agent, neighbors: &[Neighbor], vision_radius_multiplier: f64) -> DVec3 {
    let range = agent.vision_radius() * vision_radius_multiplier;
    let (sum, count) = within(agent.position(), neighbors, range)
        .fold((DVec3::ZERO, 0usize), |(sum, n), (nb, _)| (sum + nb.position, n + 1));
    if count == 0 {
        return DVec3::ZERO;
    }
    seek(agent, sum / count as f64)
}

/// Steer away from neighbors in range, closer ones weighted more.
///
/// Each neighbor contributes `unitize(position - other) / distance`.
pub fn separation(agent: &Agent, neighbors: &[Neighbor], vision_radius_multiplier: f64) -> DVec3 {
    let range = agent.vision_radius() * vision_radius_multiplier;
    let pos = agent.position();
    let (sum, count) = within(pos, neighbors, range).fold((DVec3::ZERO, 0usize), |(sum, n), (nb, d)| {
        (sum + unitize(pos - nb.position) / d, n + 1)
    });
    if count == 0 {
        return DVec3::ZERO;
    }
    steer_along(agent, sum / count as f64)
}

/// Match the mean heading of neighbors in range.
pub fn alignment(agent: &Agent, neighbors: &[Neighbor], vision_radius_multiplier: f64) -> DVec3 {
    let range = agent.vision_radius() * vision_radius_multiplier;
    let (sum, count) = within(agent.position(), neighbors, range)
        .fold((DVec3::ZERO, 0usize), |(sum, n), (nb, _)| (sum + nb.velocity, n + 1));
    if count == 0 {
        return DVec3::ZERO;
    }
    steer_along(agent, sum / count as f64)
}

/// Inverse-square pull towards a point mass.
///
/// `strength = mass * agent.mass / clamp(d, lower, upper)²`. The lower
/// clamp keeps the force finite on top of the target; the result is not
/// limited by `max_force`.
pub fn attraction(agent: &Agent, target: DVec3, mass: f64, distance_lower_limit: f64, distance_upper_limit: f64) -> DVec3 {
    let offset = target - agent.position();
    let d = offset.length().clamp(distance_lower_limit, distance_upper_limit);
    unitize(offset) * (mass * agent.mass() / (d * d))
}

/// Turn away from the boundary before reaching it.
///
/// A feeler of length `vision_distance` is cast along the heading. When it
/// crosses the boundary, the agent steers along the part of the inward
/// normal perpendicular to its heading (the inward normal itself when
/// heading straight at the wall), weighted by the inverse distance to the
/// hit.
pub fn avoid_edges(agent: &Agent, environment: &dyn Environment, vision_distance: f64) -> DVec3 {
    let probe = Segment::along(agent.position(), agent.velocity(), vision_distance);
    if probe.delta() == DVec3::ZERO {
        return DVec3::ZERO;
    }
    let Some(hit) = environment.boundary_crossing(&probe) else {
        return DVec3::ZERO;
    };
    let inward = -hit.normal;
    let mut away = unitize(reject_from(inward, agent.velocity()));
    if away == DVec3::ZERO {
        away = unitize(inward);
    }
    let d = agent.position().distance(hit.point);
    if d > 0.0 {
        away /= d;
    }
    steer_along(agent, away)
}
