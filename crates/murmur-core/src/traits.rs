//! Collaborator traits supplied by the host layer.
//!
//! The simulation core never owns geometry. An [`Environment`] answers
//! boundary queries and an [`EmissionShape`] produces spawn points; both
//! are shared read-only behind `Arc` and are never mutated by the core.

use std::fmt;

use glam::DVec3;
use rand::RngCore;

/// A straight probe from `start` to `end`, used as an agent's feeler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Probe origin (the agent's position).
    pub start: DVec3,
    /// Probe tip.
    pub end: DVec3,
}

impl Segment {
    /// Create a segment between two points.
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// A probe of `length` from `start` along `direction`.
    ///
    /// A zero direction yields a degenerate segment, which crosses
    /// nothing.
    pub fn along(start: DVec3, direction: DVec3, length: f64) -> Self {
        Self {
            start,
            end: start + crate::vector::unitize(direction) * length,
        }
    }

    /// `end - start`.
    pub fn delta(&self) -> DVec3 {
        self.end - self.start
    }

    /// Point at parameter `t ∈ [0, 1]`.
    pub fn at(&self, t: f64) -> DVec3 {
        self.start + self.delta() * t
    }
}

/// Where a probe crossed the boundary and the boundary's normal there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryHit {
    /// Crossing point on the boundary.
    pub point: DVec3,
    /// Unit normal of the boundary at `point`, pointing outward.
    pub normal: DVec3,
}

/// The space agents live in.
///
/// All methods are pure queries. Implementations must be `Send + Sync`
/// so one environment can be shared by several systems.
pub trait Environment: fmt::Debug + Send + Sync + 'static {
    /// Project a point into the environment's 2D parameter space, if it
    /// has one. Fully 3D environments return the point unchanged.
    fn map_to_2d(&self, point: DVec3) -> DVec3 {
        point
    }

    /// Closest point of the environment to `point`. Points inside map to
    /// themselves.
    fn closest_point(&self, point: DVec3) -> DVec3;

    /// Outward boundary normal nearest to `point`.
    fn closest_normal(&self, point: DVec3) -> DVec3;

    /// Whether `point` is inside (boundary inclusive).
    fn contains(&self, point: DVec3) -> bool;

    /// Position after periodic wrapping. Non-wrapping environments return
    /// the point unchanged.
    fn wrap_position(&self, point: DVec3) -> DVec3;

    /// First boundary crossing along `probe`, if any.
    fn boundary_crossing(&self, probe: &Segment) -> Option<BoundaryHit>;
}

/// Produces the point a newly spawned agent is placed at.
///
/// Invoked once per spawn. Randomized shapes draw from the system's
/// seeded generator so runs are reproducible.
pub trait EmissionShape: fmt::Debug + Send + Sync + 'static {
    /// Next emission point.
    fn emit(&self, rng: &mut dyn RngCore) -> DVec3;
}
