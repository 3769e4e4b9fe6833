//! Two-wheel differential ("Braitenberg") vehicle steering.
//!
//! A vehicle has a left and a right sensor mounted a body length out at
//! ±90° from its heading, in the plane normal to the up axis (`+Z`). Each
//! sensor reads a scalar stimulus and drives one wheel; the wheel speed
//! difference turns the heading.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use murmur_core::vector::{map_range, rotate_about, unitize};
use murmur_core::Agent;

use crate::steering::steer;

/// Rotation axis for vehicle turns.
pub const UP: DVec3 = DVec3::Z;

/// Force and raw sensor readings from one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorResponse {
    /// Steering force towards the turned heading.
    pub force: DVec3,
    /// Left sensor reading.
    pub left: f64,
    /// Right sensor reading.
    pub right: f64,
}

/// World positions of the `(left, right)` sensors.
///
/// An agent at rest has no heading; both sensors then sit on the agent.
pub fn sensor_positions(agent: &Agent) -> (DVec3, DVec3) {
    let heading = unitize(agent.velocity());
    let reach = agent.body_size();
    (
        agent.position() + rotate_about(heading, UP, FRAC_PI_2) * reach,
        agent.position() + rotate_about(heading, UP, -FRAC_PI_2) * reach,
    )
}

/// React to a point stimulus.
///
/// Each sensor reads `distance(sensor, source) / radius` (not clamped, so
/// readings exceed 1 beyond the radius). Uncrossed wiring turns by
/// `(left - right) * wheel_radius / body_size` radians about [`UP`]; crossed
/// wiring swaps the sensors. A zero body size produces no turn.
pub fn sense_point(agent: &Agent, source: DVec3, radius: f64, wheel_radius: f64, crossed: bool) -> SensorResponse {
    let (left_pos, right_pos) = sensor_positions(agent);
    let read = |p: DVec3| map_range(p.distance(source), 0.0, radius, 0.0, 1.0, false);
    let (left, right) = (read(left_pos), read(right_pos));

    let wheel_diff = (if crossed { right - left } else { left - right }) * wheel_radius;
    let angle = if agent.body_size() > 0.0 {
        wheel_diff / agent.body_size()
    } else {
        0.0
    };
    let desired = unitize(rotate_about(agent.velocity(), UP, angle));
    let force = if desired == DVec3::ZERO {
        DVec3::ZERO
    } else {
        steer(agent, desired * agent.max_speed())
    };
    SensorResponse { force, left, right }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::{AgentId, AgentSettings};

    fn vehicle(velocity: DVec3) -> Agent {
        let settings = AgentSettings {
            body_size: 1.0,
            max_speed: 1.0,
            max_force: 10.0,
            ..AgentSettings::default()
        };
        Agent::new(AgentId(0), settings, DVec3::ZERO, velocity)
    }

    #[test]
    fn sensors_sit_left_and_right_of_heading() {
        let (l, r) = sensor_positions(&vehicle(DVec3::X));
        assert!((l - DVec3::Y).length() < 1e-12);
        assert!((r + DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn uncrossed_turns_away_from_source() {
        let source = DVec3::new(2.0, -3.0, 0.0);
        let resp = sense_point(&vehicle(DVec3::X), source, 10.0, 1.0, false);
        // Right sensor is closer, so the vehicle turns left (+Y).
        assert!(resp.right < resp.left);
        assert!(resp.force.y > 0.0);
    }

    #[test]
    fn crossed_turns_towards_source() {
        let source = DVec3::new(2.0, -3.0, 0.0);
        let resp = sense_point(&vehicle(DVec3::X), source, 10.0, 1.0, true);
        assert!(resp.force.y < 0.0);
    }

    #[test]
    fn balanced_readings_keep_heading() {
        let resp = sense_point(&vehicle(DVec3::X), DVec3::new(5.0, 0.0, 0.0), 10.0, 1.0, false);
        assert!((resp.left - resp.right).abs() < 1e-12);
        assert!(resp.force.length() < 1e-12);
    }

    #[test]
    fn resting_vehicle_produces_no_force() {
        let resp = sense_point(&vehicle(DVec3::ZERO), DVec3::ONE, 10.0, 1.0, false);
        assert_eq!(resp.force, DVec3::ZERO);
    }

    #[test]
    fn readings_are_not_clamped() {
        let resp = sense_point(&vehicle(DVec3::X), DVec3::new(0.0, 40.0, 0.0), 10.0, 1.0, false);
        assert!(resp.left > 1.0 && resp.right > 1.0);
    }
}
