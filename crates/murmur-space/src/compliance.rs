//! SpatialIndex trait compliance test helpers.
//!
//! These functions verify that a backend satisfies the contract documented
//! on [`SpatialIndex`]. Reused by every backend's test module.

use glam::DVec3;
use murmur_core::AgentId;

use crate::error::SpaceError;
use crate::index::SpatialIndex;

/// O(n) reference answer: ids strictly within `radius`, sorted.
pub fn brute_force(
    pts: &[(AgentId, DVec3)],
    origin: DVec3,
    radius: f64,
    exclude: Option<AgentId>,
) -> Vec<AgentId> {
    let mut out: Vec<AgentId> = pts
        .iter()
        .filter(|(id, _)| Some(*id) != exclude)
        .filter(|(_, p)| p.distance_squared(origin) < radius * radius)
        .map(|(id, _)| *id)
        .collect();
    out.sort_unstable();
    out
}

fn query_sorted(index: &dyn SpatialIndex, origin: DVec3, radius: f64, exclude: Option<AgentId>) -> Vec<AgentId> {
    let mut v = index.query_radius(origin, radius, exclude).into_vec();
    v.sort_unstable();
    v
}

fn scatter() -> Vec<(AgentId, DVec3)> {
    (0..40)
        .map(|i| {
            let t = i as f64;
            let p = DVec3::new((t * 2.3).sin() * 12.0, (t * 1.1).cos() * 12.0, (t * 0.7).sin() * 4.0);
            (AgentId(i), p)
        })
        .collect()
}

/// Query results equal the brute-force answer from every entry.
pub fn assert_queries_match_reference(index: &mut dyn SpatialIndex) {
    index.clear();
    let pts = scatter();
    for &(id, p) in &pts {
        index.insert(id, p).unwrap();
    }
    for &(id, origin) in &pts {
        for radius in [0.0, 0.5, 3.0, 7.5, 30.0] {
            assert_eq!(
                query_sorted(index, origin, radius, Some(id)),
                brute_force(&pts, origin, radius, Some(id)),
                "query around agent {id} with radius {radius}"
            );
        }
    }
}

/// The boundary distance itself is excluded.
pub fn assert_radius_is_strict(index: &mut dyn SpatialIndex) {
    index.clear();
    index.insert(AgentId(0), DVec3::ZERO).unwrap();
    index.insert(AgentId(1), DVec3::new(2.0, 0.0, 0.0)).unwrap();
    assert!(query_sorted(index, DVec3::ZERO, 2.0, Some(AgentId(0))).is_empty());
    assert_eq!(
        query_sorted(index, DVec3::ZERO, 2.0 + 1e-9, Some(AgentId(0))),
        vec![AgentId(1)]
    );
}

/// Removing twice is harmless and the second call reports absence.
pub fn assert_remove_idempotent(index: &mut dyn SpatialIndex) {
    index.clear();
    index.insert(AgentId(5), DVec3::ONE).unwrap();
    assert!(index.remove(AgentId(5)));
    assert!(!index.remove(AgentId(5)));
    assert!(!index.remove(AgentId(6)));
    assert!(index.is_empty());
    assert!(query_sorted(index, DVec3::ONE, 10.0, None).is_empty());
}

/// Re-inserting an id moves it rather than duplicating it.
pub fn assert_reinsert_moves(index: &mut dyn SpatialIndex) {
    index.clear();
    index.insert(AgentId(1), DVec3::ZERO).unwrap();
    index.insert(AgentId(1), DVec3::new(8.0, 0.0, 0.0)).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.position_of(AgentId(1)), Some(DVec3::new(8.0, 0.0, 0.0)));
    assert!(query_sorted(index, DVec3::ZERO, 1.0, None).is_empty());
    assert_eq!(query_sorted(index, DVec3::new(8.0, 0.0, 0.0), 1.0, None), vec![AgentId(1)]);
}

/// Non-finite positions are rejected and leave the index untouched.
pub fn assert_rejects_non_finite(index: &mut dyn SpatialIndex) {
    index.clear();
    let err = index.insert(AgentId(3), DVec3::new(f64::NAN, 0.0, 0.0));
    assert!(matches!(err, Err(SpaceError::NonFinitePosition { .. })));
    assert!(!index.contains(AgentId(3)));
}

/// Degenerate query arguments match nothing.
pub fn assert_degenerate_queries_empty(index: &mut dyn SpatialIndex) {
    index.clear();
    index.insert(AgentId(0), DVec3::ZERO).unwrap();
    assert!(query_sorted(index, DVec3::ZERO, -1.0, None).is_empty());
    assert!(query_sorted(index, DVec3::ZERO, f64::NAN, None).is_empty());
    assert!(query_sorted(index, DVec3::splat(f64::NAN), 5.0, None).is_empty());
}

/// `rebuild` replaces the previous contents.
pub fn assert_rebuild_replaces(index: &mut dyn SpatialIndex) {
    index.clear();
    index.insert(AgentId(100), DVec3::ZERO).unwrap();
    let pts = scatter();
    index.rebuild(&mut pts.iter().copied()).unwrap();
    assert_eq!(index.len(), pts.len());
    assert!(!index.contains(AgentId(100)));
}

/// Run all compliance checks.
pub fn run_full_compliance(index: &mut dyn SpatialIndex) {
    assert_queries_match_reference(index);
    assert_radius_is_strict(index);
    assert_remove_idempotent(index);
    assert_reinsert_moves(index);
    assert_rejects_non_finite(index);
    assert_degenerate_queries_empty(index);
    assert_rebuild_replaces(index);
}
