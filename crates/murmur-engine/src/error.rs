//! Step and engine errors.

use std::error::Error;
use std::fmt;

use glam::DVec3;
use murmur_core::AgentId;
use murmur_space::SpaceError;

/// A step (or reset) could not complete.
///
/// The system is left with the population it had when the error was
/// raised; no partial step is rolled back.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// An agent's position became NaN or infinite, usually from a force
    /// producing a non-finite value.
    NonFinitePosition {
        /// The offending agent.
        agent: AgentId,
        /// Its position.
        position: DVec3,
    },
    /// The spatial index rejected an operation.
    Space(SpaceError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinitePosition { agent, position } => {
                write!(f, "agent {agent} reached non-finite position {position}")
            }
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::NonFinitePosition { .. } => None,
        }
    }
}

impl From<SpaceError> for StepError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::NonFinitePosition { id, position } => Self::NonFinitePosition { agent: id, position },
            other => Self::Space(other),
        }
    }
}

/// A system inside an [`Engine`](crate::Engine) failed to step.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineError {
    /// Index of the failing system.
    pub system: usize,
    /// The underlying error.
    pub kind: StepError,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system #{}: {}", self.system, self.kind)
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}
