use isosurf_geom::Vec3;

/// Quantized lattice coordinate of one grid cell.
///
/// Integer keys sidestep float-equality hazards in the node map; the world
/// position is recovered by dividing by the grid resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Quantizes a world-space position, rounding each axis to the nearest
    /// cell at `resolution` cells per world unit.
    #[inline]
    pub fn from_world(pos: Vec3, resolution: i32) -> Self {
        let r = resolution as f32;
        Self {
            x: (pos.x * r).round() as i32,
            y: (pos.y * r).round() as i32,
            z: (pos.z * r).round() as i32,
        }
    }

    /// World-space position of this cell's center.
    #[inline]
    pub fn to_world(self, resolution: i32) -> Vec3 {
        let r = resolution as f32;
        Vec3::new(self.x as f32 / r, self.y as f32 / r, self.z as f32 / r)
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl From<(i32, i32, i32)> for GridCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<GridCoord> for (i32, i32, i32) {
    fn from(value: GridCoord) -> Self {
        (value.x, value.y, value.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_nearest_cell() {
        assert_eq!(
            GridCoord::from_world(Vec3::new(0.26, -0.26, 0.74), 2),
            GridCoord::new(1, -1, 1)
        );
        assert_eq!(
            GridCoord::from_world(Vec3::new(0.2, 0.2, 0.2), 1),
            GridCoord::new(0, 0, 0)
        );
    }

    #[test]
    fn world_round_trip_at_cell_centers() {
        let c = GridCoord::new(3, -2, 7);
        for resolution in [1, 2, 4, 8] {
            let back = GridCoord::from_world(c.to_world(resolution), resolution);
            assert_eq!(back, c);
        }
    }
}
