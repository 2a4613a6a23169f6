use isosurf_geom::Vec3;
use isosurf_grid::{GridCoord, GridError, NEIGHBOR_SLOTS, SparseGrid};
use isosurf_mask::CornerMask;
use isosurf_mesh::WHITE;

fn grid(resolution: i32) -> SparseGrid {
    SparseGrid::new(resolution).expect("valid resolution")
}

#[test]
fn rejects_non_positive_resolution() {
    assert_eq!(
        SparseGrid::new(0).err(),
        Some(GridError::InvalidResolution(0))
    );
    assert!(SparseGrid::new(-4).is_err());
    assert!(SparseGrid::new(1).is_ok());
}

#[test]
fn isolated_populate_creates_fifteen_cells() {
    let mut g = grid(1);
    let changed = g.populate(Vec3::ZERO);

    assert_eq!(changed.len(), 15);
    assert_eq!(g.len(), 15);

    let center = g.node(GridCoord::new(0, 0, 0)).expect("center exists");
    assert!(center.has_point());
    assert_eq!(center.vacant(), CornerMask::NONE);

    for s in NEIGHBOR_SLOTS {
        let n = g
            .node(GridCoord::new(s.dx, s.dy, s.dz))
            .expect("neighbor exists");
        assert!(!n.has_point());
        // Exactly the direction back toward the center is occupied.
        assert_eq!(n.vacant(), CornerMask::ALL.remove(mirror_key(s.key)));
        assert!(n.is_boundary());
    }
}

// The key a neighbor clears is the direction from itself back to the center,
// which is the slot whose delta is the negation of the outgoing one.
fn mirror_key(out: CornerMask) -> CornerMask {
    let s = NEIGHBOR_SLOTS
        .iter()
        .find(|s| s.key == out)
        .expect("slot exists");
    NEIGHBOR_SLOTS
        .iter()
        .find(|m| (m.dx, m.dy, m.dz) == (-s.dx, -s.dy, -s.dz))
        .expect("mirror exists")
        .key
}

#[test]
fn populate_is_idempotent() {
    let mut g = grid(2);
    let p = Vec3::new(1.0, 2.0, 3.0);
    let first = g.populate(p);
    assert_eq!(first.len(), 15);

    let second = g.populate(p);
    assert!(second.is_empty());
    assert_eq!(g.len(), 15);
}

#[test]
fn color_only_repopulate_touches_just_the_node() {
    let mut g = grid(1);
    let p = Vec3::ZERO;
    g.populate_colored(p, [255, 0, 0, 255]);
    let before: Vec<CornerMask> = NEIGHBOR_SLOTS
        .iter()
        .map(|s| g.node(GridCoord::new(s.dx, s.dy, s.dz)).unwrap().vacant())
        .collect();

    let changed = g.populate_colored(p, [0, 255, 0, 255]);
    assert_eq!(changed, vec![GridCoord::new(0, 0, 0)]);

    let node = g.node(GridCoord::new(0, 0, 0)).unwrap();
    assert_eq!(node.color(), [0, 255, 0, 255]);
    assert_eq!(node.vacant(), CornerMask::NONE);
    let after: Vec<CornerMask> = NEIGHBOR_SLOTS
        .iter()
        .map(|s| g.node(GridCoord::new(s.dx, s.dy, s.dz)).unwrap().vacant())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn delete_missing_is_a_trivial_success() {
    let mut g = grid(1);
    assert!(g.delete(Vec3::new(9.0, 9.0, 9.0)).is_empty());
    assert!(g.is_empty());

    g.populate(Vec3::ZERO);
    let first = g.delete(Vec3::ZERO);
    assert_eq!(first.len(), 15);
    let second = g.delete(Vec3::ZERO);
    assert!(second.is_empty());
}

#[test]
fn single_hop_locality() {
    let mut g = grid(1);
    let changed = g.populate(Vec3::ZERO);

    for c in &changed {
        assert!(
            c.x.abs() <= 1 && c.y.abs() <= 1 && c.z.abs() <= 1,
            "distance-2 cell {c:?} leaked into the change set"
        );
    }
    // The 12 edge-diagonal cells of the 3x3x3 shell are not tracked and
    // must not materialize.
    assert!(g.node(GridCoord::new(1, 1, 0)).is_none());
    assert!(g.node(GridCoord::new(0, 1, 1)).is_none());
    assert!(g.node(GridCoord::new(2, 0, 0)).is_none());
}

#[test]
fn populate_then_delete_round_trips_vacancy() {
    let mut g = grid(1);
    let p = Vec3::new(3.0, -2.0, 5.0);
    let touched = g.populate(p);
    g.delete(p);

    for c in touched {
        let node = g.node(c).expect("nodes are never destroyed");
        assert!(!node.has_point());
        assert_eq!(node.vacant(), CornerMask::ALL);
        assert!(!node.is_boundary());
    }
    // Cells persist after the round trip; growth is monotonic by design.
    assert_eq!(g.len(), 15);
}

#[test]
fn batch_reports_one_deduplicated_change_set() {
    let mut g = grid(1);
    // Two face-adjacent points share most of their neighborhoods.
    let changed = g.populate_batch(&[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);

    let mut unique = changed.clone();
    unique.sort_by_key(|c| (c.x, c.y, c.z));
    unique.dedup();
    assert_eq!(changed.len(), unique.len(), "change set contains duplicates");

    // 3x3x3 tracked cells around each center, overlapping: the union is
    // covered once.
    assert!(changed.contains(&GridCoord::new(0, 0, 0)));
    assert!(changed.contains(&GridCoord::new(1, 0, 0)));
}

#[test]
fn batch_color_length_mismatch_is_rejected() {
    let mut g = grid(1);
    let err = g
        .populate_batch_colored(&[Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)], &[WHITE])
        .unwrap_err();
    assert_eq!(
        err,
        GridError::ColorCountMismatch {
            positions: 2,
            colors: 1
        }
    );
    // Fail-fast: nothing was applied.
    assert!(g.is_empty());
}

#[test]
fn neighbors_inherit_the_populating_color() {
    let mut g = grid(1);
    let red = [200, 10, 10, 255];
    g.populate_colored(Vec3::ZERO, red);
    let n = g.node(GridCoord::new(0, 1, 0)).unwrap();
    assert_eq!(n.color(), red);
    assert_eq!(n.part().color, red);
}

#[test]
fn adjacent_interior_points_clear_each_others_vacancy() {
    let mut g = grid(1);
    g.populate(Vec3::ZERO);
    g.populate(Vec3::new(1.0, 0.0, 0.0));

    // Both are interior, so both report NONE regardless of surroundings.
    assert_eq!(
        g.node(GridCoord::new(0, 0, 0)).unwrap().vacant(),
        CornerMask::NONE
    );
    assert_eq!(
        g.node(GridCoord::new(1, 0, 0)).unwrap().vacant(),
        CornerMask::NONE
    );

    // The cell above the first point sees it through the BOTTOM face slot;
    // the second point sits on an untracked edge diagonal and changes
    // nothing here.
    let above = g.node(GridCoord::new(0, 1, 0)).unwrap();
    assert!(above.is_boundary());
    assert!(!above.vacant().contains(CornerMask::BOTTOM));
}

#[test]
fn quantization_folds_nearby_points_into_one_cell() {
    let mut g = grid(2);
    g.populate(Vec3::new(0.26, 0.0, 0.0));
    // 0.26 * 2 rounds to cell x=1, the same cell as 0.5.
    let node = g.node_at(Vec3::new(0.5, 0.0, 0.0)).expect("same cell");
    assert!(node.has_point());
    assert_eq!(node.coord(), GridCoord::new(1, 0, 0));

    // Re-populating through the other alias is a no-op.
    assert!(g.populate(Vec3::new(0.5, 0.0, 0.0)).is_empty());
}

#[test]
fn stats_track_interior_and_boundary_counts() {
    let mut g = grid(1);
    assert_eq!(g.stats().nodes, 0);

    g.populate(Vec3::ZERO);
    let stats = g.stats();
    assert_eq!(stats.nodes, 15);
    assert_eq!(stats.interior, 1);
    assert_eq!(stats.boundary, 14);

    g.delete(Vec3::ZERO);
    let stats = g.stats();
    assert_eq!(stats.nodes, 15);
    assert_eq!(stats.interior, 0);
    assert_eq!(stats.boundary, 0);
}

#[test]
fn snapshot_is_detached_from_later_mutation() {
    let mut g = grid(1);
    g.populate(Vec3::ZERO);
    let snap = g.snapshot();
    let boundary_before = snap.iter().filter(|s| !s.vacant.is_none() && !s.vacant.is_all()).count();

    g.delete(Vec3::ZERO);

    // The snapshot still reflects the populated state.
    let boundary_after = snap.iter().filter(|s| !s.vacant.is_none() && !s.vacant.is_all()).count();
    assert_eq!(boundary_before, 14);
    assert_eq!(boundary_after, 14);
}
