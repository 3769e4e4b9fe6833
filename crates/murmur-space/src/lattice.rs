//! Uniform-grid ("bin lattice") spatial index.
//!
//! The lattice covers an axis-aligned box split into cubic cells of side
//! `cell_size`. Each cell holds a bucket of `(AgentId, position)` entries
//! and an id → cell map makes removal O(bucket size).
//!
//! # Bounds policy
//!
//! Bounds only ever grow. An insert outside the box doubles the extent of
//! every overshot axis (towards the point, repeatedly) and then re-bins
//! every entry before inserting. A stale cell mapping would silently drop
//! neighbors, so expansion always rebuilds.
//!
//! Cell count grows with the bounds: a single far outlier allocates a
//! large, mostly empty grid. Clearing only touches the buckets that hold
//! entries, so a rebuild after the outlier is gone still costs O(agents).

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec3;
use indexmap::IndexMap;
use murmur_core::AgentId;
use smallvec::SmallVec;

use crate::bounds::Aabb;
use crate::error::SpaceError;
use crate::index::{check_position, query_is_meaningful, Neighbors, SpatialIndex};

/// Default lattice cell side length.
pub const DEFAULT_BIN_SIZE: f64 = 5.0;

/// Integer cell coordinate `[column, row, layer]`.
pub type CellCoord = [usize; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    id: AgentId,
    position: DVec3,
}

type Bucket = SmallVec<[Entry; 4]>;

/// Dense 3D grid of agent buckets with self-expanding bounds.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use murmur_core::AgentId;
/// use murmur_space::{BinLattice, SpatialIndex};
///
/// let mut lattice = BinLattice::with_cell_size(2.0).unwrap();
/// lattice.insert(AgentId(0), DVec3::ZERO).unwrap();
/// lattice.insert(AgentId(1), DVec3::new(1.0, 0.0, 0.0)).unwrap();
/// // Far outside the initial bounds: the lattice grows to fit.
/// lattice.insert(AgentId(2), DVec3::new(40.0, 0.0, 0.0)).unwrap();
///
/// let near = lattice.query_radius(DVec3::ZERO, 1.5, Some(AgentId(0)));
/// assert_eq!(near.as_slice(), &[AgentId(1)]);
/// ```
#[derive(Debug)]
pub struct BinLattice {
    bounds: Aabb,
    cell_size: f64,
    dims: [usize; 3],
    cells: Vec<Bucket>,
    /// id → (flat cell rank, position).
    locations: IndexMap<AgentId, (usize, DVec3)>,
    expansions: u64,
    visited: AtomicU64,
    cleared: u64,
}

impl BinLattice {
    /// Create a lattice over `bounds` with cubic cells of side `cell_size`.
    ///
    /// Zero-extent axes are padded by `cell_size / 2` on each side so the
    /// box always has volume.
    pub fn new(bounds: Aabb, cell_size: f64) -> Result<Self, SpaceError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpaceError::InvalidCellSize { value: cell_size });
        }
        let bounds = bounds.pad_degenerate(cell_size / 2.0);
        let dims = dims_for(&bounds, cell_size);
        Ok(Self {
            bounds,
            cell_size,
            dims,
            cells: vec![Bucket::new(); dims[0] * dims[1] * dims[2]],
            locations: IndexMap::new(),
            expansions: 0,
            visited: AtomicU64::new(0),
            cleared: 0,
        })
    }

    /// A single-cell lattice centred on the origin. It grows on demand.
    pub fn with_cell_size(cell_size: f64) -> Result<Self, SpaceError> {
        Self::new(Aabb::new(DVec3::ZERO, DVec3::ZERO)?, cell_size)
    }

    /// Current bounds.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Cell side length.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cells per axis.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of bounds expansions since construction.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Buckets emptied by [`clear`](SpatialIndex::clear) since
    /// construction. Empty cells are never touched.
    pub fn buckets_cleared(&self) -> u64 {
        self.cleared
    }

    /// Cell currently holding `id`.
    pub fn cell_of(&self, id: AgentId) -> Option<CellCoord> {
        self.locations
            .get(&id)
            .map(|&(rank, _)| unrank(rank, self.dims))
    }

    /// Non-empty cells in rank order, each with its ids sorted.
    ///
    /// Two lattices holding the same entries at the same positions with
    /// the same bounds produce equal occupancies.
    pub fn occupancy(&self) -> Vec<(CellCoord, Vec<AgentId>)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(rank, bucket)| {
                let mut ids: Vec<AgentId> = bucket.iter().map(|e| e.id).collect();
                ids.sort_unstable();
                (unrank(rank, self.dims), ids)
            })
            .collect()
    }

    fn cell_for(&self, p: DVec3) -> CellCoord {
        let rel = (p - self.bounds.min()) / self.cell_size;
        let mut c = [0usize; 3];
        for axis in 0..3 {
            let i = rel[axis].floor().max(0.0) as usize;
            c[axis] = i.min(self.dims[axis] - 1);
        }
        c
    }

    fn rank(&self, c: CellCoord) -> usize {
        (c[0] * self.dims[1] + c[1]) * self.dims[2] + c[2]
    }

    /// Inclusive per-axis cell ranges that can hold points within
    /// `radius` of `origin`, or `None` when the sphere misses the grid.
    fn cell_range(&self, origin: DVec3, radius: f64) -> Option<[RangeInclusive<usize>; 3]> {
        // Widen by a hair so rounding at cell faces cannot drop a cell.
        let slack = self.cell_size * 1e-9;
        let mut out = [0..=0, 0..=0, 0..=0];
        for (axis, range) in out.iter_mut().enumerate() {
            let offset = origin[axis] - self.bounds.min()[axis];
            let last = (self.dims[axis] - 1) as f64;
            let lo = ((offset - radius - slack) / self.cell_size).floor();
            let hi = ((offset + radius + slack) / self.cell_size).floor();
            if hi < 0.0 || lo > last {
                return None;
            }
            *range = (lo.max(0.0) as usize)..=(hi.min(last) as usize);
        }
        Some(out)
    }

    /// Re-bin every entry after the grid shape changed.
    fn rebin_all(&mut self) {
        self.dims = dims_for(&self.bounds, self.cell_size);
        self.cells = vec![Bucket::new(); self.dims[0] * self.dims[1] * self.dims[2]];
        let ids: Vec<(AgentId, DVec3)> = self.locations.iter().map(|(&id, &(_, p))| (id, p)).collect();
        for (id, position) in ids {
            let rank = self.rank(self.cell_for(position));
            self.cells[rank].push(Entry { id, position });
            self.locations.insert(id, (rank, position));
        }
    }

    fn detach(&mut self, id: AgentId) -> bool {
        let Some((rank, _)) = self.locations.swap_remove(&id) else {
            return false;
        };
        let bucket = &mut self.cells[rank];
        match bucket.iter().position(|e| e.id == id) {
            Some(i) => {
                bucket.swap_remove(i);
            }
            None => debug_assert!(false, "agent {id} mapped to cell {rank} but missing from bucket"),
        }
        true
    }
}

impl SpatialIndex for BinLattice {
    fn insert(&mut self, id: AgentId, position: DVec3) -> Result<(), SpaceError> {
        check_position(id, position)?;
        self.detach(id);
        if self.bounds.grow_by_doubling(position) {
            self.expansions += 1;
            self.rebin_all();
            log::debug!(
                "bin lattice grew to [{} .. {}] ({:?} cells) for agent {id}",
                self.bounds.min(),
                self.bounds.max(),
                self.dims
            );
        }
        let rank = self.rank(self.cell_for(position));
        self.cells[rank].push(Entry { id, position });
        self.locations.insert(id, (rank, position));
        Ok(())
    }

    fn remove(&mut self, id: AgentId) -> bool {
        self.detach(id)
    }

    fn query_radius(&self, origin: DVec3, radius: f64, exclude: Option<AgentId>) -> Neighbors {
        let mut out = Neighbors::new();
        if self.locations.is_empty() || !query_is_meaningful(origin, radius) {
            return out;
        }
        let Some([xs, ys, zs]) = self.cell_range(origin, radius) else {
            return out;
        };
        let r_sq = radius * radius;
        let mut visited = 0u64;
        for x in xs {
            for y in ys.clone() {
                for z in zs.clone() {
                    let bucket = &self.cells[self.rank([x, y, z])];
                    visited += bucket.len() as u64;
                    out.extend(
                        bucket
                            .iter()
                            .filter(|e| Some(e.id) != exclude)
                            .filter(|e| e.position.distance_squared(origin) < r_sq)
                            .map(|e| e.id),
                    );
                }
            }
        }
        self.visited.fetch_add(visited, Ordering::Relaxed);
        out
    }

    fn clear(&mut self) {
        for &(rank, _) in self.locations.values() {
            let bucket = &mut self.cells[rank];
            if !bucket.is_empty() {
                bucket.clear();
                self.cleared += 1;
            }
        }
        self.locations.clear();
    }

    fn len(&self) -> usize {
        self.locations.len()
    }

    fn contains(&self, id: AgentId) -> bool {
        self.locations.contains_key(&id)
    }

    fn position_of(&self, id: AgentId) -> Option<DVec3> {
        self.locations.get(&id).map(|&(_, p)| p)
    }

    fn candidates_visited(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }
}

fn dims_for(bounds: &Aabb, cell_size: f64) -> [usize; 3] {
    let e = bounds.extent();
    let per_axis = |len: f64| ((len / cell_size).ceil() as usize).max(1);
    [per_axis(e.x), per_axis(e.y), per_axis(e.z)]
}

fn unrank(rank: usize, dims: [usize; 3]) -> CellCoord {
    let z = rank % dims[2];
    let y = (rank / dims[2]) % dims[1];
    let x = rank / (dims[1] * dims[2]);
    [x, y, z]
}
