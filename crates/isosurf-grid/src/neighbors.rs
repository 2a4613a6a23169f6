//! The 14 tracked neighbor slots: 8 corner diagonals + 6 axis faces.

use isosurf_mask::CornerMask;

/// Mask key and lattice delta for one tracked neighbor slot.
///
/// Corner slots clear a single corner bit; face slots clear the four corner
/// bits of that face at once.
#[derive(Clone, Copy, Debug)]
pub struct NeighborSlot {
    pub key: CornerMask,
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

const fn slot(key: CornerMask, dx: i32, dy: i32, dz: i32) -> NeighborSlot {
    NeighborSlot { key, dx, dy, dz }
}

/// Deltas follow the cube diagram: v0..v3 on the bottom ring starting at
/// (-1,-1,+1) and winding clockwise seen from above, v4..v7 stacked on top.
pub const NEIGHBOR_SLOTS: [NeighborSlot; 14] = [
    slot(CornerMask::V0, -1, -1, 1),
    slot(CornerMask::V1, 1, -1, 1),
    slot(CornerMask::V2, 1, -1, -1),
    slot(CornerMask::V3, -1, -1, -1),
    slot(CornerMask::V4, -1, 1, 1),
    slot(CornerMask::V5, 1, 1, 1),
    slot(CornerMask::V6, 1, 1, -1),
    slot(CornerMask::V7, -1, 1, -1),
    slot(CornerMask::BOTTOM, 0, -1, 0),
    slot(CornerMask::TOP, 0, 1, 0),
    slot(CornerMask::LEFT, -1, 0, 0),
    slot(CornerMask::RIGHT, 1, 0, 0),
    slot(CornerMask::FRONT, 0, 0, -1),
    slot(CornerMask::BACK, 0, 0, 1),
];
