//! Core types and traits for the Murmur agent simulation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Murmur workspace:
//! identifiers, the [`Agent`] entity and its [`AgentSettings`] template,
//! vector helpers over [`glam::DVec3`], parameter validation errors, and
//! the collaborator traits [`Environment`] and [`EmissionShape`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod history;
pub mod id;
pub mod traits;
pub mod vector;

pub use agent::{Agent, AgentSettings};
pub use error::ParamError;
pub use history::PositionHistory;
pub use id::{AgentId, StepId};
pub use traits::{BoundaryHit, EmissionShape, Environment, Segment};

/// Re-exported so downstream crates name the same vector type.
pub use glam::DVec3;
