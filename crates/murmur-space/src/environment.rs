//! Axis-aligned box environment.

use glam::DVec3;
use murmur_core::{BoundaryHit, Environment, Segment};

use crate::bounds::Aabb;

/// Half-width of the default world box.
pub const DEFAULT_WORLD_HALF_SIZE: f64 = 100.0;

/// A closed axis-aligned box, optionally periodic.
///
/// With `wrap` set, [`Environment::wrap_position`] maps points into the
/// box modulo its extent (a 3-torus). Boundary crossings are reported for
/// exiting probes only: an agent already outside and moving further out
/// crosses nothing.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use murmur_core::{Environment, Segment};
/// use murmur_space::{Aabb, BoxEnvironment};
///
/// let world = BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 10.0).unwrap(), false);
/// let probe = Segment::new(DVec3::new(9.0, 0.0, 0.0), DVec3::new(12.0, 0.0, 0.0));
/// let hit = world.boundary_crossing(&probe).unwrap();
/// assert_eq!(hit.point, DVec3::new(10.0, 0.0, 0.0));
/// assert_eq!(hit.normal, DVec3::X);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoxEnvironment {
    bounds: Aabb,
    wrap: bool,
}

impl Default for BoxEnvironment {
    fn default() -> Self {
        let h = DVec3::splat(DEFAULT_WORLD_HALF_SIZE);
        Self {
            bounds: Aabb::from_ordered(-h, h),
            wrap: false,
        }
    }
}

impl BoxEnvironment {
    /// Create an environment over `bounds`.
    pub fn new(bounds: Aabb, wrap: bool) -> Self {
        Self { bounds, wrap }
    }

    /// The box.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Whether positions wrap periodically.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    fn on_face(&self, p: DVec3, axis: usize) -> bool {
        let eps = 1e-9 * self.bounds.extent().max_element().max(1.0);
        (0..3).filter(|&a| a != axis).all(|a| {
            p[a] >= self.bounds.min()[a] - eps && p[a] <= self.bounds.max()[a] + eps
        })
    }
}

impl Environment for BoxEnvironment {
    fn closest_point(&self, point: DVec3) -> DVec3 {
        self.bounds.clamp(point)
    }

    fn closest_normal(&self, point: DVec3) -> DVec3 {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        let mut best = (f64::NEG_INFINITY, DVec3::ZERO);
        for axis in 0..3 {
            let unit = DVec3::AXES[axis];
            // Signed distance past each face: negative inside, positive outside.
            for (past, normal) in [(point[axis] - max[axis], unit), (min[axis] - point[axis], -unit)] {
                if past > best.0 {
                    best = (past, normal);
                }
            }
        }
        best.1
    }

    fn contains(&self, point: DVec3) -> bool {
        self.bounds.contains(point)
    }

    fn wrap_position(&self, point: DVec3) -> DVec3 {
        if !self.wrap {
            return point;
        }
        let (min, extent) = (self.bounds.min(), self.bounds.extent());
        let mut out = point;
        for axis in 0..3 {
            if extent[axis] > 0.0 {
                out[axis] = min[axis] + (point[axis] - min[axis]).rem_euclid(extent[axis]);
            } else {
                out[axis] = min[axis];
            }
        }
        out
    }

    fn boundary_crossing(&self, probe: &Segment) -> Option<BoundaryHit> {
        let d = probe.delta();
        let (min, max) = (self.bounds.min(), self.bounds.max());
        let mut best: Option<(f64, BoundaryHit)> = None;
        for axis in 0..3 {
            let unit = DVec3::AXES[axis];
            let exit = if d[axis] > 0.0 && probe.start[axis] <= max[axis] && probe.end[axis] > max[axis] {
                Some((max[axis], unit))
            } else if d[axis] < 0.0 && probe.start[axis] >= min[axis] && probe.end[axis] < min[axis] {
                Some((min[axis], -unit))
            } else {
                None
            };
            let Some((plane, normal)) = exit else {
                continue;
            };
            let t = (plane - probe.start[axis]) / d[axis];
            let mut point = probe.at(t);
            point[axis] = plane;
            if !self.on_face(point, axis) {
                continue;
            }
            if best.as_ref().is_none_or(|(bt, _)| t < *bt) {
                best = Some((t, BoundaryHit { point, normal }));
            }
        }
        best.map(|(_, hit)| hit)
    }
}
