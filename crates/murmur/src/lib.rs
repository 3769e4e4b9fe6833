//! Murmur: an agent-based flocking and steering simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Murmur sub-crates. For most users, adding `murmur` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use murmur::prelude::*;
//! use murmur::space::Aabb;
//!
//! // A flock of 50 spawned inside a ±10 box, kept inside a ±20 world.
//! let world = BoxEnvironment::new(Aabb::centered(DVec3::ZERO, 20.0).unwrap(), false);
//! let spawn = BoxShape::new(Aabb::centered(DVec3::ZERO, 10.0).unwrap());
//! let config = SystemConfig {
//!     emitters: vec![Emitter::burst(Arc::new(spawn), 50)],
//!     rules: RuleSet::new()
//!         .with_force(ForceKind::Separation { vision_radius_multiplier: 0.5 })
//!         .with_force(ForceKind::Alignment { vision_radius_multiplier: 1.0 })
//!         .with_force(ForceKind::Cohesion { vision_radius_multiplier: 1.0 })
//!         .with_behavior(BehaviorKind::BounceContain),
//!     environment: Some(Arc::new(world)),
//!     seed: 42,
//!     ..SystemConfig::default()
//! };
//! let mut system = AgentSystem::new(config).unwrap();
//! for _ in 0..10 {
//!     system.step().unwrap();
//! }
//! assert_eq!(system.step_id(), StepId(10));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `murmur-core` | IDs, `Agent`, settings, vector helpers, collaborator traits |
//! | [`space`] | `murmur-space` | Spatial indexes, bounds, the box environment |
//! | [`rules`] | `murmur-rules` | Steering forces, behaviors, rule sets |
//! | [`engine`] | `murmur-engine` | Emitters, agent systems, the multi-system engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`murmur-core`).
///
/// Contains the [`types::Agent`] entity, [`types::AgentSettings`], vector
/// helpers, and the collaborator traits [`types::Environment`] and
/// [`types::EmissionShape`].
pub use murmur_core as types;

/// Spatial indexes and environments (`murmur-space`).
///
/// Provides the [`space::SpatialIndex`] trait and its backends
/// [`space::BinLattice`] and [`space::SpatialList`], plus
/// [`space::BoxEnvironment`].
pub use murmur_space as space;

/// Steering forces and behaviors (`murmur-rules`).
///
/// Free steering functions live in [`rules::steering`] and
/// [`rules::vehicle`]; [`rules::RuleSet`] bundles them for a system.
pub use murmur_rules as rules;

/// Agent systems and the step loop (`murmur-engine`).
///
/// [`engine::AgentSystem`] for one population, [`engine::Engine`] to drive
/// several together.
pub use murmur_engine as engine;

/// Common imports for typical Murmur usage.
///
/// ```rust
/// use murmur::prelude::*;
/// ```
///
/// This imports the most frequently used types: system configuration,
/// emitters and shapes, rule building blocks, core traits and IDs.
pub mod prelude {
    // Core types and traits
    pub use murmur_core::{Agent, AgentId, AgentSettings, DVec3, EmissionShape, Environment, StepId};

    // Space
    pub use murmur_space::{BoxEnvironment, SpatialIndex};

    // Rules
    pub use murmur_rules::{BehaviorKind, Force, ForceKind, RuleSet};

    // Errors
    pub use murmur_engine::{ConfigError, EngineError, StepError};

    // Engine
    pub use murmur_engine::{
        AgentSystem, BoxShape, Emitter, Engine, IndexKind, PointShape, StepMetrics, SystemConfig,
    };
}
