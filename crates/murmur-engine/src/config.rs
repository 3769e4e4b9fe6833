//! System configuration, validation, and error types.
//!
//! [`SystemConfig`] is the builder-input for
//! [`AgentSystem::new`](crate::AgentSystem::new). [`ConfigError`]
//! enumerates everything that can go wrong during validation.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use murmur_core::{AgentSettings, Environment, ParamError};
use murmur_rules::{RuleError, RuleSet};
use murmur_space::{BinLattice, SpaceError, SpatialIndex, SpatialList, DEFAULT_BIN_SIZE};

use crate::emitter::Emitter;

// ── IndexKind ──────────────────────────────────────────────────────

/// Which spatial index backend a system uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndexKind {
    /// Uniform grid with self-expanding bounds.
    BinLattice {
        /// Edge length of one cubic cell.
        cell_size: f64,
    },
    /// Flat list scanned in full per query.
    List,
}

impl Default for IndexKind {
    fn default() -> Self {
        Self::BinLattice {
            cell_size: DEFAULT_BIN_SIZE,
        }
    }
}

impl IndexKind {
    /// Construct an empty index of this kind.
    pub fn build(&self) -> Result<Box<dyn SpatialIndex>, SpaceError> {
        Ok(match *self {
            Self::BinLattice { cell_size } => Box::new(BinLattice::with_cell_size(cell_size)?),
            Self::List => Box::new(SpatialList::default()),
        })
    }

    fn validate(&self) -> Result<(), SpaceError> {
        match *self {
            Self::BinLattice { cell_size } if !(cell_size.is_finite() && cell_size > 0.0) => {
                Err(SpaceError::InvalidCellSize { value: cell_size })
            }
            _ => Ok(()),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SystemConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// No agent settings template was supplied.
    NoSettings,
    /// A settings template failed validation.
    Settings {
        /// Position in the template list.
        index: usize,
        /// The underlying parameter error.
        source: ParamError,
    },
    /// An emitter failed validation.
    Emitter {
        /// Position in the emitter list.
        index: usize,
        /// The underlying parameter error.
        source: ParamError,
    },
    /// The rule set failed validation.
    Rules(RuleError),
    /// The spatial index could not be configured.
    Space(SpaceError),
    /// Rules that act on the environment were configured without one.
    MissingEnvironment {
        /// Names of the rules that need an environment.
        rules: Vec<&'static str>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSettings => write!(f, "at least one agent settings template is required"),
            Self::Settings { index, source } => write!(f, "settings #{index}: {source}"),
            Self::Emitter { index, source } => write!(f, "emitter #{index}: {source}"),
            Self::Rules(e) => write!(f, "rules: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::MissingEnvironment { rules } => {
                write!(f, "rules [{}] need an environment but none is configured", rules.join(", "))
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Settings { source, .. } | Self::Emitter { source, .. } => Some(source),
            Self::Rules(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RuleError> for ConfigError {
    fn from(e: RuleError) -> Self {
        Self::Rules(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SystemConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing an agent system.
///
/// Settings templates are handed to spawned agents round-robin, in list
/// order, across every emitter.
#[derive(Clone, Debug)]
pub struct SystemConfig {
    /// Agent settings templates. Must not be empty.
    pub settings: Vec<AgentSettings>,
    /// Emitters, evaluated in list order.
    pub emitters: Vec<Emitter>,
    /// Forces and behaviors every agent runs.
    pub rules: RuleSet,
    /// Optional world boundary shared with other systems.
    pub environment: Option<Arc<dyn Environment>>,
    /// Spatial index backend.
    pub index: IndexKind,
    /// RNG seed. Resetting reseeds with this value.
    pub seed: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            settings: vec![AgentSettings::default()],
            emitters: Vec::new(),
            rules: RuleSet::new(),
            environment: None,
            index: IndexKind::default(),
            seed: 0,
        }
    }
}

impl SystemConfig {
    /// Validate every part of the configuration.
    ///
    /// Checks run in field order and the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.is_empty() {
            return Err(ConfigError::NoSettings);
        }
        for (index, settings) in self.settings.iter().enumerate() {
            settings
                .validate()
                .map_err(|source| ConfigError::Settings { index, source })?;
        }
        for (index, emitter) in self.emitters.iter().enumerate() {
            emitter
                .validate()
                .map_err(|source| ConfigError::Emitter { index, source })?;
        }
        check_rules(&self.rules, self.environment.is_some())?;
        self.index.validate()?;
        Ok(())
    }
}

/// Validate `rules` and check that an environment exists if they need one.
pub(crate) fn check_rules(rules: &RuleSet, has_environment: bool) -> Result<(), ConfigError> {
    rules.validate()?;
    if !has_environment && rules.requires_environment() {
        return Err(ConfigError::MissingEnvironment {
            rules: rules.environment_rules(),
        });
    }
    Ok(())
}
