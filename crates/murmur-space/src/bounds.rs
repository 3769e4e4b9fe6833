//! Axis-aligned bounding boxes.

use glam::DVec3;

use crate::error::SpaceError;

/// An axis-aligned box, `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: DVec3,
    max: DVec3,
}

impl Aabb {
    /// Create a box from two corners.
    ///
    /// The corners must be finite and ordered per axis. Boxes are always
    /// axis-aligned, so there is no orientation to validate.
    pub fn new(min: DVec3, max: DVec3) -> Result<Self, SpaceError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SpaceError::InvalidBounds {
                reason: format!("corners must be finite, got {min} and {max}"),
            });
        }
        if min.cmpgt(max).any() {
            return Err(SpaceError::InvalidBounds {
                reason: format!("min {min} exceeds max {max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Build from corners already known to be finite and ordered.
    pub(crate) const fn from_ordered(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing both points, in any order.
    pub fn from_corners(a: DVec3, b: DVec3) -> Result<Self, SpaceError> {
        Self::new(a.min(b), a.max(b))
    }

    /// Cube of half-width `half` around `center`.
    pub fn centered(center: DVec3, half: f64) -> Result<Self, SpaceError> {
        Self::from_corners(center - DVec3::splat(half), center + DVec3::splat(half))
    }

    /// Lower corner.
    pub fn min(&self) -> DVec3 {
        self.min
    }

    /// Upper corner.
    pub fn max(&self) -> DVec3 {
        self.max
    }

    /// `max - min`.
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// Midpoint.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether `p` lies inside, boundary inclusive.
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Clamp `p` onto the box.
    pub fn clamp(&self, p: DVec3) -> DVec3 {
        p.clamp(self.min, self.max)
    }

    /// Widen every zero-extent axis by `pad` on both sides.
    pub(crate) fn pad_degenerate(mut self, pad: f64) -> Self {
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] <= 0.0 {
                self.min[axis] -= pad;
                self.max[axis] += pad;
            }
        }
        self
    }

    /// Grow until `p` is inside by doubling the extent of each overshot
    /// axis, repeatedly, towards the side `p` lies on.
    ///
    /// Returns whether the box changed. Every axis must have a positive
    /// extent, otherwise doubling cannot make progress.
    pub(crate) fn grow_by_doubling(&mut self, p: DVec3) -> bool {
        let mut grew = false;
        for axis in 0..3 {
            debug_assert!(self.max[axis] > self.min[axis], "zero-extent axis {axis}");
            while p[axis] < self.min[axis] {
                self.min[axis] -= self.max[axis] - self.min[axis];
                grew = true;
            }
            while p[axis] > self.max[axis] {
                self.max[axis] += self.max[axis] - self.min[axis];
                grew = true;
            }
        }
        grew
    }
}
