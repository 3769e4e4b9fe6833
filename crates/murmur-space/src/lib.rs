//! Spatial neighbor indexes for Murmur simulations.
//!
//! This crate defines the [`SpatialIndex`] trait, through which every
//! neighbor query in an agent system flows, along with its backends and a
//! reference axis-aligned [`BoxEnvironment`].
//!
//! # Backends
//!
//! - [`BinLattice`]: uniform 3D grid of buckets with self-expanding bounds
//! - [`SpatialList`]: flat list scanned in full per query, the brute-force
//!   reference the lattice is checked against

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod environment;
pub mod error;
pub mod index;
pub mod lattice;
pub mod list;

#[cfg(test)]
pub(crate) mod compliance;

pub use bounds::Aabb;
pub use environment::BoxEnvironment;
pub use error::SpaceError;
pub use index::{Neighbors, SpatialIndex};
pub use lattice::{BinLattice, CellCoord, DEFAULT_BIN_SIZE};
pub use list::SpatialList;
