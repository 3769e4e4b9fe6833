//! Fixed-capacity ring buffer of past agent positions.

use glam::DVec3;

/// A fixed-capacity ring of positions, most-recent-last.
///
/// The write position is monotonically increasing (never wraps). Slot
/// index is computed as `pos % capacity`; once full, each push overwrites
/// the oldest entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionHistory {
    slots: Vec<DVec3>,
    write_pos: u64,
    capacity: usize,
}

impl PositionHistory {
    /// Create an empty history holding at most `capacity` positions.
    ///
    /// A capacity of zero is raised to one; settings validation rejects
    /// `history_length == 0` before an agent is ever built.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            write_pos: 0,
            capacity,
        }
    }

    /// Append a position, evicting the oldest when full.
    pub fn push(&mut self, position: DVec3) {
        let idx = (self.write_pos as usize) % self.capacity;
        if self.slots.len() < self.capacity {
            self.slots.push(position);
        } else {
            self.slots[idx] = position;
        }
        self.write_pos += 1;
    }

    /// The most recently pushed position.
    pub fn latest(&self) -> Option<DVec3> {
        if self.write_pos == 0 {
            return None;
        }
        let idx = ((self.write_pos - 1) as usize) % self.capacity;
        self.slots.get(idx).copied()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        let len = self.slots.len();
        let start = if len < self.capacity {
            0
        } else {
            (self.write_pos as usize) % self.capacity
        };
        (0..len).map(move |i| self.slots[(start + i) % len])
    }

    /// Positions currently held (≤ capacity).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of positions retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total pushes since creation, including evicted ones.
    pub fn total_pushed(&self) -> u64 {
        self.write_pos
    }
}
