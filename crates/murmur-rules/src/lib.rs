//! Steering forces and discrete behaviors for Murmur agents.
//!
//! Forces are pure functions from an agent plus its perceived neighbors
//! (or an environment query) to a force vector; the caller weights the
//! result and feeds it to [`Agent::apply_force`](murmur_core::Agent::apply_force).
//! Behaviors mutate state directly: [`behavior::eat`] kills neighbors,
//! [`behavior::bounce_contain`] reflects velocity off the boundary.
//!
//! # Evaluation order (each agent, each step)
//!
//! 1. Every [`Force`] in the [`RuleSet`], in list order
//! 2. Every [`BehaviorKind`] in the [`RuleSet`], in list order
//!
//! Floating-point accumulation is order dependent, so the order is part of
//! the result.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod error;
pub mod force;
pub mod neighbor;
pub mod ruleset;
pub mod steering;
pub mod vehicle;

pub use behavior::BehaviorKind;
pub use error::RuleError;
pub use force::{Force, ForceKind};
pub use neighbor::Neighbor;
pub use ruleset::{RuleOutcome, RuleSet};
pub use vehicle::SensorResponse;
