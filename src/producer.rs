use isosurf_geom::Vec3;
use isosurf_grid::{GridCoord, SparseGrid};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of world-space edit positions driving the grid.
pub trait PointProducer {
    /// Applies one step of edits and returns the combined change set.
    fn step(&mut self, grid: &mut SparseGrid) -> Vec<GridCoord>;
}

/// Scatters one populated point and a burst of three deletions per step,
/// uniformly inside a cube around `center`.
pub struct RandomProducer {
    rng: StdRng,
    center: Vec3,
    range: f32,
}

impl RandomProducer {
    pub fn new(seed: u64, center: Vec3, range: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            center,
            range,
        }
    }

    fn random_point(&mut self) -> Vec3 {
        let r = self.range;
        self.center
            + Vec3::new(
                self.rng.random_range(-r..r),
                self.rng.random_range(-r..r),
                self.rng.random_range(-r..r),
            )
    }
}

impl PointProducer for RandomProducer {
    fn step(&mut self, grid: &mut SparseGrid) -> Vec<GridCoord> {
        let mut changed = grid.populate(self.random_point());

        let removes = [
            self.random_point(),
            self.random_point(),
            self.random_point(),
        ];
        for coord in grid.delete_batch(&removes) {
            if !changed.contains(&coord) {
                changed.push(coord);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_points() {
        let mut a = RandomProducer::new(7, Vec3::ZERO, 5.0);
        let mut b = RandomProducer::new(7, Vec3::ZERO, 5.0);
        let mut ga = SparseGrid::new(1).unwrap();
        let mut gb = SparseGrid::new(1).unwrap();
        for _ in 0..10 {
            assert_eq!(a.step(&mut ga), b.step(&mut gb));
        }
        assert_eq!(ga.len(), gb.len());
    }

    #[test]
    fn points_stay_inside_the_cube() {
        let mut p = RandomProducer::new(3, Vec3::new(10.0, 0.0, 0.0), 2.0);
        for _ in 0..50 {
            let v = p.random_point();
            assert!((v.x - 10.0).abs() <= 2.0);
            assert!(v.y.abs() <= 2.0);
            assert!(v.z.abs() <= 2.0);
        }
    }
}
