//! Mesh fragments and the corner-configuration -> triangle-list table.
#![forbid(unsafe_code)]

mod constants;
mod tables;

pub use constants::{OPAQUE_ALPHA, WHITE};

use isosurf_geom::Vec3;
use isosurf_mask::CornerMask;

use crate::constants::{CONFIG_TABLE_SIZE, TRI_END};
use crate::tables::{EDGE_MIDPOINTS, TRI_TABLE};

/// Flat fragment color, RGBA8.
pub type Rgba = [u8; 4];

/// One reusable fragment of surface geometry: vertex positions, triangle
/// index triples into those positions, and one flat color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshPart {
    pub verts: Vec<Vec3>,
    pub tris: Vec<u32>,
    pub color: Rgba,
}

impl MeshPart {
    /// The explicit empty fragment: zero vertices, zero triangles.
    pub fn invalid() -> MeshPart {
        MeshPart {
            verts: Vec::new(),
            tris: Vec::new(),
            color: WHITE,
        }
    }

    /// A fragment with no triangles produces no surface.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.tris.len() / 3
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.verts {
            *v += offset;
        }
    }
}

/// One pre-built template fragment per corner configuration, scaled once for
/// a fixed grid resolution.
///
/// Templates are only ever cloned out (`fragment_for`), never handed out
/// mutably, so per-node translation cannot corrupt the table.
pub struct PartSet {
    resolution: i32,
    parts: Vec<MeshPart>,
}

impl PartSet {
    /// Builds the full 256-entry template set for `resolution`.
    ///
    /// All 12 edge-midpoint vertices are scaled by `1 / (2 * resolution)`
    /// here so fragments need no further per-use scaling. Sentinel entries
    /// in the triangle table are filtered out; configurations with no
    /// surface (e.g. fully inside or fully outside) keep their vertices but
    /// carry zero triangles.
    pub fn build(resolution: i32) -> PartSet {
        let scale = 1.0 / (2.0 * resolution as f32);
        let verts: Vec<Vec3> = EDGE_MIDPOINTS.iter().map(|&v| v * scale).collect();
        let parts = (0..CONFIG_TABLE_SIZE)
            .map(|m| {
                let tris: Vec<u32> = TRI_TABLE[m]
                    .iter()
                    .filter(|&&t| t != TRI_END)
                    .map(|&t| t as u32)
                    .collect();
                MeshPart {
                    verts: verts.clone(),
                    tris,
                    color: WHITE,
                }
            })
            .collect();
        PartSet { resolution, parts }
    }

    #[inline]
    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    /// Template fragment for `mask`. Total over the full mask range; edge
    /// and face alias masks are corner-bit unions and resolve like any
    /// other configuration.
    #[inline]
    pub fn part(&self, mask: CornerMask) -> &MeshPart {
        &self.parts[mask.bits() as usize]
    }

    /// Deep-copies the template for `mask`, moved to `origin` and tinted
    /// `color`. Returns the explicit empty fragment when the configuration
    /// has no surface; callers must check `is_empty` before assuming a
    /// renderable fragment exists.
    pub fn fragment_for(&self, mask: CornerMask, origin: Vec3, color: Rgba) -> MeshPart {
        let template = self.part(mask);
        if template.is_empty() {
            let mut part = MeshPart::invalid();
            part.color = color;
            return part;
        }
        let mut part = template.clone();
        part.translate(origin);
        part.color = color;
        part
    }
}
