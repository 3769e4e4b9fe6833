//! Test utilities and mock collaborators for Murmur development.
//!
//! Provides mock implementations of the collaborator traits
//! ([`Environment`], [`EmissionShape`](murmur_core::EmissionShape)) plus
//! agent and point fixtures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{agent_at, scatter, still_settings, CountingShape, SequenceShape};

use glam::DVec3;
use murmur_core::{BoundaryHit, Environment, Segment};

/// An environment with no boundary.
///
/// Every point is inside, nothing is ever crossed, and wrapping is the
/// identity. Rules that need an environment run but never fire.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OpenEnvironment;

impl Environment for OpenEnvironment {
    fn closest_point(&self, point: DVec3) -> DVec3 {
        point
    }

    fn closest_normal(&self, _point: DVec3) -> DVec3 {
        DVec3::ZERO
    }

    fn contains(&self, _point: DVec3) -> bool {
        true
    }

    fn wrap_position(&self, point: DVec3) -> DVec3 {
        point
    }

    fn boundary_crossing(&self, _probe: &Segment) -> Option<BoundaryHit> {
        None
    }
}

/// An unbounded environment whose 2D parameter space is the `z = 0`
/// plane. Otherwise behaves like [`OpenEnvironment`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatEnvironment;

impl Environment for FlatEnvironment {
    fn map_to_2d(&self, point: DVec3) -> DVec3 {
        DVec3::new(point.x, point.y, 0.0)
    }

    fn closest_point(&self, point: DVec3) -> DVec3 {
        point
    }

    fn closest_normal(&self, _point: DVec3) -> DVec3 {
        DVec3::ZERO
    }

    fn contains(&self, _point: DVec3) -> bool {
        true
    }

    fn wrap_position(&self, point: DVec3) -> DVec3 {
        point
    }

    fn boundary_crossing(&self, _probe: &Segment) -> Option<BoundaryHit> {
        None
    }
}

/// An environment whose only boundary is the plane `x = wall`, crossed
/// when moving in +X. Points with `x > wall` are outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallEnvironment {
    pub wall: f64,
}

impl Environment for WallEnvironment {
    fn closest_point(&self, point: DVec3) -> DVec3 {
        DVec3::new(point.x.min(self.wall), point.y, point.z)
    }

    fn closest_normal(&self, _point: DVec3) -> DVec3 {
        DVec3::X
    }

    fn contains(&self, point: DVec3) -> bool {
        point.x <= self.wall
    }

    fn wrap_position(&self, point: DVec3) -> DVec3 {
        point
    }

    fn boundary_crossing(&self, probe: &Segment) -> Option<BoundaryHit> {
        let d = probe.delta();
        if d.x <= 0.0 || probe.start.x > self.wall || probe.end.x <= self.wall {
            return None;
        }
        let t = (self.wall - probe.start.x) / d.x;
        Some(BoundaryHit {
            point: probe.at(t),
            normal: DVec3::X,
        })
    }
}
