//! Brute-force spatial index.

use glam::DVec3;
use indexmap::IndexMap;
use murmur_core::AgentId;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SpaceError;
use crate::index::{check_position, query_is_meaningful, Neighbors, SpatialIndex};

/// Flat list of entries; every query scans all of them.
///
/// O(n) per query, so O(n²) per step. Useful for tiny populations and as
/// the reference [`BinLattice`](crate::BinLattice) is tested against.
#[derive(Debug, Default)]
pub struct SpatialList {
    entries: IndexMap<AgentId, DVec3>,
    visited: AtomicU64,
}

impl SpatialList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for SpatialList {
    fn insert(&mut self, id: AgentId, position: DVec3) -> Result<(), SpaceError> {
        check_position(id, position)?;
        self.entries.insert(id, position);
        Ok(())
    }

    fn remove(&mut self, id: AgentId) -> bool {
        self.entries.swap_remove(&id).is_some()
    }

    fn query_radius(&self, origin: DVec3, radius: f64, exclude: Option<AgentId>) -> Neighbors {
        if !query_is_meaningful(origin, radius) {
            return Neighbors::new();
        }
        self.visited
            .fetch_add(self.entries.len() as u64, Ordering::Relaxed);
        let r_sq = radius * radius;
        self.entries
            .iter()
            .filter(|&(&id, _)| Some(id) != exclude)
            .filter(|&(_, p)| p.distance_squared(origin) < r_sq)
            .map(|(&id, _)| id)
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, id: AgentId) -> bool {
        self.entries.contains_key(&id)
    }

    fn position_of(&self, id: AgentId) -> Option<DVec3> {
        self.entries.get(&id).copied()
    }

    fn candidates_visited(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }
}
