//! Neighbor snapshots and field-of-view perception.

use glam::DVec3;
use murmur_core::vector::unitize;
use murmur_core::{Agent, AgentId};

/// Frozen view of another agent, taken once per step after the index
/// rebuild.
///
/// Rules read neighbors only through this snapshot, so no agent can see
/// another agent's already-updated state within the same step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Identity of the observed agent.
    pub id: AgentId,
    /// Its position at snapshot time.
    pub position: DVec3,
    /// Its velocity at snapshot time.
    pub velocity: DVec3,
}

impl Neighbor {
    /// Snapshot `agent`.
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id(),
            position: agent.position(),
            velocity: agent.velocity(),
        }
    }
}

/// Whether `point` falls inside the agent's field of view.
///
/// The cone is centred on the heading with half-angle
/// `vision_angle / 2`. An agent at rest, a point on top of the agent, or
/// a vision angle of 360° sees everything.
pub fn in_view(agent: &Agent, point: DVec3) -> bool {
    let angle = agent.settings().vision_angle;
    if angle >= 360.0 {
        return true;
    }
    let heading = unitize(agent.velocity());
    let offset = unitize(point - agent.position());
    if heading == DVec3::ZERO || offset == DVec3::ZERO {
        return true;
    }
    let half = (angle / 2.0).to_radians();
    heading.dot(offset).clamp(-1.0, 1.0).acos() <= half
}

/// Neighbors strictly between zero and `range` away, with their distance.
///
/// Coincident neighbors are skipped: they define no direction.
pub(crate) fn within(
    origin: DVec3,
    neighbors: &[Neighbor],
    range: f64,
) -> impl Iterator<Item = (&Neighbor, f64)> + '_ {
    neighbors.iter().filter_map(move |n| {
        let d = origin.distance(n.position);
        (d > 0.0 && d < range).then_some((n, d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::AgentSettings;

    fn looking_along_x(vision_angle: f64) -> Agent {
        let settings = AgentSettings {
            vision_angle,
            ..AgentSettings::default()
        };
        Agent::new(AgentId(0), settings, DVec3::ZERO, DVec3::X)
    }

    #[test]
    fn full_circle_sees_behind() {
        let a = looking_along_x(360.0);
        assert!(in_view(&a, DVec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn narrow_cone_filters_by_angle() {
        let a = looking_along_x(90.0);
        assert!(in_view(&a, DVec3::new(5.0, 4.0, 0.0)));
        assert!(!in_view(&a, DVec3::new(1.0, 2.0, 0.0)));
        assert!(!in_view(&a, DVec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn resting_agent_sees_everything() {
        let settings = AgentSettings {
            vision_angle: 10.0,
            ..AgentSettings::default()
        };
        let a = Agent::new(AgentId(0), settings, DVec3::ZERO, DVec3::ZERO);
        assert!(in_view(&a, DVec3::new(-3.0, 0.0, 0.0)));
    }

    #[test]
    fn within_skips_coincident_and_far() {
        let n = |id, x| Neighbor {
            id: AgentId(id),
            position: DVec3::new(x, 0.0, 0.0),
            velocity: DVec3::ZERO,
        };
        let ns = [n(1, 0.0), n(2, 1.0), n(3, 5.0)];
        let ids: Vec<AgentId> = within(DVec3::ZERO, &ns, 5.0).map(|(n, _)| n.id).collect();
        assert_eq!(ids, vec![AgentId(2)]);
    }
}
