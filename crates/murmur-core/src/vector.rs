//! Vector helpers over [`DVec3`].
//!
//! `glam` already supplies the algebra (add, subtract, scale, length,
//! distance). These helpers add the steering-specific operations whose
//! degenerate cases must never produce NaN: a zero-length input is
//! returned unchanged rather than normalized or rotated.

use glam::{DQuat, DVec3};

/// Squared length below which a vector is treated as zero.
pub const ZERO_EPSILON_SQ: f64 = 1e-24;

/// Unit vector in the direction of `v`, or zero when `v` has no length.
pub fn unitize(v: DVec3) -> DVec3 {
    if v.length_squared() <= ZERO_EPSILON_SQ {
        DVec3::ZERO
    } else {
        v.normalize()
    }
}

/// Rescale `v` to `max` when it is longer than `max`.
///
/// Shorter vectors (and the zero vector) are returned unchanged, so
/// `limit(v, m).length() <= m` holds up to rounding for every `v`.
pub fn limit(v: DVec3, max: f64) -> DVec3 {
    let len_sq = v.length_squared();
    if len_sq > max * max {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Rotate `v` by `angle` radians about `axis` (right-handed).
///
/// A zero-length axis or vector leaves `v` unrotated.
pub fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    let axis = unitize(axis);
    if axis == DVec3::ZERO || v.length_squared() <= ZERO_EPSILON_SQ {
        return v;
    }
    DQuat::from_axis_angle(axis, angle) * v
}

/// Mirror `v` about the plane with normal `normal`: `v - 2(v·n)n`.
///
/// The normal is unitized first; a zero normal leaves `v` unchanged.
pub fn reflect(v: DVec3, normal: DVec3) -> DVec3 {
    let n = unitize(normal);
    v - 2.0 * v.dot(n) * n
}

/// Component of `v` perpendicular to `direction`.
pub fn reject_from(v: DVec3, direction: DVec3) -> DVec3 {
    let d = unitize(direction);
    v - v.dot(d) * d
}

/// Remap `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
///
/// With `clamp` the result stays inside the target interval. A
/// degenerate source interval maps everything to `to_lo`.
pub fn map_range(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64, clamp: bool) -> f64 {
    let span = from_hi - from_lo;
    if span == 0.0 {
        return to_lo;
    }
    let t = (value - from_lo) / span;
    let t = if clamp { t.clamp(0.0, 1.0) } else { t };
    to_lo + t * (to_hi - to_lo)
}
