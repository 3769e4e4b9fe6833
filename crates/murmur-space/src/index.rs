//! The `SpatialIndex` trait.

use glam::DVec3;
use murmur_core::AgentId;
use smallvec::SmallVec;

use crate::error::SpaceError;

/// Result of a radius query. Order is unspecified.
pub type Neighbors = SmallVec<[AgentId; 16]>;

/// Radius-bounded neighbor queries over agent positions.
///
/// Backends store `(AgentId, position)` pairs; they never see the agents
/// themselves. Identity, not position, distinguishes entries: two agents
/// at the same point are two entries.
///
/// # Contract
///
/// - Every inserted id is present exactly once until removed or cleared.
///   Re-inserting a present id moves it.
/// - [`remove`](Self::remove) of an absent id is a no-op.
/// - [`query_radius`](Self::query_radius) returns exactly the ids at a
///   distance strictly less than `radius` from `origin`, minus `exclude`.
///
/// `Send + Sync` so a system owning a `Box<dyn SpatialIndex>` can move
/// between threads.
pub trait SpatialIndex: Send + Sync + 'static {
    /// Insert or move `id` to `position`.
    ///
    /// Fails only for non-finite positions.
    fn insert(&mut self, id: AgentId, position: DVec3) -> Result<(), SpaceError>;

    /// Remove `id`. Returns whether it was present.
    fn remove(&mut self, id: AgentId) -> bool;

    /// Ids strictly within `radius` of `origin`, excluding `exclude`.
    ///
    /// A negative or NaN radius, or a non-finite origin, matches nothing.
    fn query_radius(&self, origin: DVec3, radius: f64, exclude: Option<AgentId>) -> Neighbors;

    /// Drop every entry.
    fn clear(&mut self);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` is present.
    fn contains(&self, id: AgentId) -> bool;

    /// Position recorded for `id`.
    fn position_of(&self, id: AgentId) -> Option<DVec3>;

    /// Candidate entries the last queries had to distance-test.
    ///
    /// Cumulative since construction; callers diff it for per-step
    /// figures. Backends that do not track it return 0.
    fn candidates_visited(&self) -> u64 {
        0
    }

    /// Replace the contents with `items`.
    ///
    /// Stops at the first failing insert; the index then holds the items
    /// inserted before it.
    fn rebuild(&mut self, items: &mut dyn Iterator<Item = (AgentId, DVec3)>) -> Result<(), SpaceError> {
        self.clear();
        for (id, position) in items {
            self.insert(id, position)?;
        }
        Ok(())
    }
}

/// Whether a query with these arguments can match anything.
pub(crate) fn query_is_meaningful(origin: DVec3, radius: f64) -> bool {
    origin.is_finite() && radius >= 0.0
}

/// Reject non-finite positions before they reach a backend.
pub(crate) fn check_position(id: AgentId, position: DVec3) -> Result<(), SpaceError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(SpaceError::NonFinitePosition { id, position })
    }
}
