//! Error types for spatial index and environment construction.

use std::fmt;

use glam::DVec3;
use murmur_core::AgentId;

/// Errors arising from index construction or insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// An inserted position has a NaN or infinite component.
    NonFinitePosition {
        /// The agent being inserted.
        id: AgentId,
        /// The rejected position.
        position: DVec3,
    },
    /// Lattice cell size must be finite and strictly positive.
    InvalidCellSize {
        /// The rejected value.
        value: f64,
    },
    /// Bounds must be finite with `min <= max` on every axis.
    InvalidBounds {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinitePosition { id, position } => {
                write!(f, "agent {id} has non-finite position {position}")
            }
            Self::InvalidCellSize { value } => {
                write!(f, "cell size must be finite and > 0, got {value}")
            }
            Self::InvalidBounds { reason } => write!(f, "invalid bounds: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
