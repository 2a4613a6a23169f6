//! Shared constants for isosurf-mesh. Centralizes common magic numbers.

pub(crate) const CONFIG_TABLE_SIZE: usize = 256; // 2^8 corner patterns
pub(crate) const TRI_ROW_LEN: usize = 16; // 5 triangles max, -1 padded
pub(crate) const TRI_END: i8 = -1; // sentinel padding in the triangle table
pub(crate) const EDGE_MIDPOINT_COUNT: usize = 12; // one vertex per cube edge

pub const OPAQUE_ALPHA: u8 = 255;
/// Default fragment color when a point carries none.
pub const WHITE: [u8; 4] = [255, 255, 255, OPAQUE_ALPHA];
