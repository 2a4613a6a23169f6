//! Sparse, unbounded node grid with incremental neighbor-vacancy
//! recalculation.
//!
//! Each populated point claims one quantized cell; the cell and its 14
//! tracked neighbors track which directions around them still lack an
//! occupied neighbor, and cache the surface fragment their configuration
//! maps to. Mutation is single-threaded: callers must serialize
//! populate/delete batches.
#![forbid(unsafe_code)]

mod coord;
mod neighbors;

pub use coord::GridCoord;
pub use neighbors::{NEIGHBOR_SLOTS, NeighborSlot};

use hashbrown::HashMap;
use isosurf_geom::Vec3;
use isosurf_mask::CornerMask;
use isosurf_mesh::{MeshPart, PartSet, Rgba, WHITE};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid resolution must be >= 1, got {0}")]
    InvalidResolution(i32),
    #[error("{positions} positions given with {colors} colors")]
    ColorCountMismatch { positions: usize, colors: usize },
}

/// One cell of the sparse grid.
///
/// `vacant` is always the complement of "has an occupied neighbor" over the
/// 14 tracked directions, except that an interior node is `NONE` outright
/// (it is fully inside the volume and carries no surface).
#[derive(Clone, Debug)]
pub struct Node {
    coord: GridCoord,
    has_point: bool,
    vacant: CornerMask,
    color: Rgba,
    part: MeshPart,
}

impl Node {
    fn new(coord: GridCoord, has_point: bool, color: Rgba) -> Node {
        Node {
            coord,
            has_point,
            vacant: CornerMask::ALL,
            color,
            part: MeshPart::invalid(),
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    #[inline]
    pub fn has_point(&self) -> bool {
        self.has_point
    }

    #[inline]
    pub fn vacant(&self) -> CornerMask {
        self.vacant
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Cached fragment for the current configuration, already translated to
    /// this node's world position.
    #[inline]
    pub fn part(&self) -> &MeshPart {
        &self.part
    }

    /// Only partially surrounded nodes contribute surface.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.vacant.is_none() && !self.vacant.is_all()
    }
}

/// Value copy of one node's merge-relevant state, taken at snapshot time so
/// later grid mutation cannot affect a running merge.
#[derive(Clone, Debug)]
pub struct NodeSnapshot {
    pub vacant: CornerMask,
    pub part: MeshPart,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GridStats {
    pub nodes: usize,
    pub interior: usize,
    pub boundary: usize,
}

/// Sparse position-keyed grid of nodes.
///
/// Nodes are created lazily the first time an edit touches their cell or an
/// adjacent one, and are never destroyed; memory grows with the touched
/// region for the lifetime of the grid.
pub struct SparseGrid {
    resolution: i32,
    nodes: HashMap<GridCoord, Node>,
    parts: PartSet,
}

impl SparseGrid {
    /// Creates an empty grid at `resolution` cells per world unit.
    /// The resolution is fixed for the grid's lifetime; changing it would
    /// invalidate every cached fragment and position key.
    pub fn new(resolution: i32) -> Result<SparseGrid, GridError> {
        if resolution < 1 {
            return Err(GridError::InvalidResolution(resolution));
        }
        Ok(SparseGrid {
            resolution,
            nodes: HashMap::new(),
            parts: PartSet::build(resolution),
        })
    }

    #[inline]
    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at a lattice coordinate, if one has been materialized.
    #[inline]
    pub fn node(&self, coord: GridCoord) -> Option<&Node> {
        self.nodes.get(&coord)
    }

    /// Node containing a world-space position, if one has been materialized.
    #[inline]
    pub fn node_at(&self, pos: Vec3) -> Option<&Node> {
        self.nodes.get(&GridCoord::from_world(pos, self.resolution))
    }

    /// Iterates every materialized node, in map order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            nodes: self.nodes.len(),
            ..GridStats::default()
        };
        for node in self.nodes.values() {
            if node.has_point {
                stats.interior += 1;
            }
            if node.is_boundary() {
                stats.boundary += 1;
            }
        }
        stats
    }

    /// Value snapshot of every node for a merge run.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.nodes
            .values()
            .map(|n| NodeSnapshot {
                vacant: n.vacant,
                part: n.part.clone(),
            })
            .collect()
    }

    /// Marks a world-space position as inside the volume. Returns the
    /// de-duplicated set of touched cells; empty when the call was a no-op.
    pub fn populate(&mut self, pos: Vec3) -> Vec<GridCoord> {
        self.populate_colored(pos, WHITE)
    }

    pub fn populate_colored(&mut self, pos: Vec3, color: Rgba) -> Vec<GridCoord> {
        let mut changed = Vec::new();
        self.populate_point(pos, color, &mut changed);
        changed
    }

    /// Populates a batch of positions as one logical update with one
    /// combined change set.
    pub fn populate_batch(&mut self, positions: &[Vec3]) -> Vec<GridCoord> {
        let mut changed = Vec::new();
        for &pos in positions {
            self.populate_point(pos, WHITE, &mut changed);
        }
        changed
    }

    /// Batch populate with one color per position. The two slices must be
    /// the same length; a mismatch is a caller bug and is rejected outright.
    pub fn populate_batch_colored(
        &mut self,
        positions: &[Vec3],
        colors: &[Rgba],
    ) -> Result<Vec<GridCoord>, GridError> {
        if positions.len() != colors.len() {
            return Err(GridError::ColorCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        let mut changed = Vec::new();
        for (&pos, &color) in positions.iter().zip(colors.iter()) {
            self.populate_point(pos, color, &mut changed);
        }
        Ok(changed)
    }

    /// Clears the point inside a cell. Deleting an absent or already-empty
    /// cell is a trivial success with an empty change set.
    pub fn delete(&mut self, pos: Vec3) -> Vec<GridCoord> {
        let mut changed = Vec::new();
        self.delete_point(pos, &mut changed);
        changed
    }

    pub fn delete_batch(&mut self, positions: &[Vec3]) -> Vec<GridCoord> {
        let mut changed = Vec::new();
        for &pos in positions {
            self.delete_point(pos, &mut changed);
        }
        changed
    }

    fn populate_point(&mut self, pos: Vec3, color: Rgba, changed: &mut Vec<GridCoord>) {
        let coord = GridCoord::from_world(pos, self.resolution);
        match self.nodes.get(&coord).map(|n| (n.has_point, n.color)) {
            None => {
                self.nodes.insert(coord, Node::new(coord, true, color));
                self.recalculate(coord);
                mark_changed(changed, coord);
                self.visit_neighbors(coord, changed);
                log::trace!(target: "grid", "populate new cell {coord:?}");
            }
            Some((false, _)) => {
                if let Some(node) = self.nodes.get_mut(&coord) {
                    node.has_point = true;
                    node.color = color;
                }
                self.recalculate(coord);
                mark_changed(changed, coord);
                self.visit_neighbors(coord, changed);
                log::trace!(target: "grid", "populate existing cell {coord:?}");
            }
            Some((true, old_color)) => {
                // Already interior: a color change retints the cached
                // fragment but neither vacancy nor neighbors move.
                if old_color != color {
                    if let Some(node) = self.nodes.get_mut(&coord) {
                        node.color = color;
                        node.part.color = color;
                    }
                    mark_changed(changed, coord);
                }
            }
        }
    }

    fn delete_point(&mut self, pos: Vec3, changed: &mut Vec<GridCoord>) {
        let coord = GridCoord::from_world(pos, self.resolution);
        let interior = self.nodes.get(&coord).is_some_and(|n| n.has_point);
        if !interior {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&coord) {
            node.has_point = false;
        }
        self.recalculate(coord);
        mark_changed(changed, coord);
        self.visit_neighbors(coord, changed);
        log::trace!(target: "grid", "delete cell {coord:?}");
    }

    /// Visits the 14 tracked offsets around a cell whose interior state
    /// just changed: missing neighbors are materialized (non-interior,
    /// inheriting the cell's color), existing ones re-derive their own
    /// vacancy. Deliberately single-hop; second-order neighbors are never
    /// touched.
    fn visit_neighbors(&mut self, coord: GridCoord, changed: &mut Vec<GridCoord>) {
        let color = self
            .nodes
            .get(&coord)
            .map(|n| n.color)
            .unwrap_or(WHITE);
        for s in NEIGHBOR_SLOTS {
            let at = coord.offset(s.dx, s.dy, s.dz);
            if !self.nodes.contains_key(&at) {
                self.nodes.insert(at, Node::new(at, false, color));
            }
            self.recalculate(at);
            mark_changed(changed, at);
        }
    }

    /// Re-derives one node's vacancy from scratch by scanning its own 14
    /// tracked neighbors, and refreshes the cached fragment only when the
    /// configuration actually changed value.
    fn recalculate(&mut self, coord: GridCoord) {
        let Some(node) = self.nodes.get(&coord) else {
            return;
        };
        let prev = node.vacant;
        let color = node.color;

        let vacant = if node.has_point {
            // Fully interior; no surface needed here.
            CornerMask::NONE
        } else {
            let mut vacant = CornerMask::ALL;
            for s in NEIGHBOR_SLOTS {
                let occupied = self
                    .nodes
                    .get(&coord.offset(s.dx, s.dy, s.dz))
                    .is_some_and(|n| n.has_point);
                if occupied {
                    vacant = vacant.remove(s.key);
                }
            }
            vacant
        };

        if vacant != prev {
            let part =
                self.parts
                    .fragment_for(vacant, coord.to_world(self.resolution), color);
            if let Some(node) = self.nodes.get_mut(&coord) {
                node.vacant = vacant;
                node.part = part;
            }
            log::trace!(
                target: "grid",
                "recalculate {coord:?}: {:#010b} -> {:#010b}",
                prev.bits(),
                vacant.bits()
            );
        }
    }
}

/// Change sets stay small (15 cells per isolated edit), so a linear dedup
/// beats hashing here.
fn mark_changed(changed: &mut Vec<GridCoord>, coord: GridCoord) {
    if !changed.contains(&coord) {
        changed.push(coord);
    }
}
