//! Agent systems and the step loop for Murmur simulations.
//!
//! An [`AgentSystem`] owns a population of agents, the [`Emitter`]s that
//! create them, the [`RuleSet`](murmur_rules::RuleSet) they follow and the
//! spatial index they query. An [`Engine`] drives several systems at once.
//!
//! # Step order
//!
//! 1. Continuous emitters spawn
//! 2. The spatial index is rebuilt from the live population
//! 3. Every agent evaluates its rules against a frozen neighbor snapshot
//! 4. Every agent integrates
//! 5. Dead agents are culled
//!
//! Evaluation is sequential in spawn order, so two systems built from the
//! same [`SystemConfig`] and seed produce identical trajectories.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod system;

pub use config::{ConfigError, IndexKind, SystemConfig};
pub use emitter::{BoxShape, Emitter, PointShape};
pub use engine::Engine;
pub use error::{EngineError, StepError};
pub use metrics::StepMetrics;
pub use system::AgentSystem;
