//! Rule validation errors.

use std::error::Error;
use std::fmt;

use murmur_core::ParamError;

/// A force or behavior in a [`RuleSet`](crate::RuleSet) has bad parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleError {
    /// A force failed validation.
    InvalidForce {
        /// Position in the force list.
        index: usize,
        /// Force kind name.
        name: &'static str,
        /// The underlying parameter error.
        source: ParamError,
    },
    /// A behavior failed validation.
    InvalidBehavior {
        /// Position in the behavior list.
        index: usize,
        /// Behavior kind name.
        name: &'static str,
        /// The underlying parameter error.
        source: ParamError,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidForce { index, name, source } => {
                write!(f, "force #{index} ({name}): {source}")
            }
            Self::InvalidBehavior { index, name, source } => {
                write!(f, "behavior #{index} ({name}): {source}")
            }
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidForce { source, .. } | Self::InvalidBehavior { source, .. } => Some(source),
        }
    }
}
