//! Parameter validation errors shared by every Murmur crate.
//!
//! Settings templates, force parameters and emitter schedules are all
//! numeric knobs supplied by the host layer. They are checked once at the
//! construction boundary and reported as a [`ParamError`]; the pure
//! simulation code never re-validates them.

use std::error::Error;
use std::fmt;

/// A numeric parameter failed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    /// The value is NaN or infinite.
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must be strictly greater than zero.
    NotPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value must be zero or greater.
    Negative {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value lies outside an inclusive range.
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// An integer count must be at least one.
    Zero {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// Two parameters are individually valid but inconsistent.
    Inconsistent {
        /// Human-readable description of the conflict.
        reason: String,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { name, value } => write!(f, "{name} must be finite, got {value}"),
            Self::NotPositive { name, value } => write!(f, "{name} must be > 0, got {value}"),
            Self::Negative { name, value } => write!(f, "{name} must be >= 0, got {value}"),
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} must be in [{min}, {max}], got {value}"),
            Self::Zero { name } => write!(f, "{name} must be at least 1"),
            Self::Inconsistent { reason } => write!(f, "inconsistent parameters: {reason}"),
        }
    }
}

impl Error for ParamError {}

// ── Checks ─────────────────────────────────────────────────────

/// Require a finite value.
pub fn finite(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NonFinite { name, value })
    }
}

/// Require a finite value strictly greater than zero.
pub fn positive(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ParamError::NotPositive { name, value })
    }
}

/// Require a finite value of zero or more.
pub fn non_negative(name: &'static str, value: f64) -> Result<f64, ParamError> {
    if finite(name, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ParamError::Negative { name, value })
    }
}

/// Require a finite value inside `[min, max]`.
pub fn in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ParamError> {
    let value = finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Require a point or vector with three finite components.
pub fn finite_vec(name: &'static str, v: glam::DVec3) -> Result<glam::DVec3, ParamError> {
    for c in v.to_array() {
        finite(name, c)?;
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(positive("mass", 1.0).is_ok());
        assert!(matches!(
            positive("mass", 0.0),
            Err(ParamError::NotPositive { name: "mass", .. })
        ));
        assert!(matches!(
            positive("mass", f64::NAN),
            Err(ParamError::NonFinite { .. })
        ));
    }

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range("angle", 0.0, 0.0, 360.0).is_ok());
        assert!(in_range("angle", 360.0, 0.0, 360.0).is_ok());
        assert!(in_range("angle", 360.5, 0.0, 360.0).is_err());
    }

    #[test]
    fn finite_vec_names_the_parameter() {
        let err = finite_vec("target", glam::DVec3::new(0.0, f64::INFINITY, 0.0)).unwrap_err();
        assert_eq!(err.to_string(), "target must be finite, got inf");
    }
}
