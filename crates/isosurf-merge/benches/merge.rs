use criterion::{Criterion, black_box, criterion_group, criterion_main};

use isosurf_geom::Vec3;
use isosurf_grid::SparseGrid;
use isosurf_merge::merge_parts;

// Populates a solid axis-aligned blob so the snapshot carries a realistic
// mix of interior, boundary and exterior nodes.
fn blob_grid(half_extent: i32) -> SparseGrid {
    let mut grid = SparseGrid::new(1).expect("resolution 1");
    let mut points = Vec::new();
    for z in -half_extent..=half_extent {
        for y in -half_extent..=half_extent {
            for x in -half_extent..=half_extent {
                points.push(Vec3::new(x as f32, y as f32, z as f32));
            }
        }
    }
    grid.populate_batch(&points);
    grid
}

fn bench_merge_blob(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_blob");
    for half_extent in [4, 8] {
        let grid = blob_grid(half_extent);
        let snapshot = grid.snapshot();
        let label = format!("blob_{}", half_extent * 2 + 1);
        group.bench_function(label, |b| {
            b.iter(|| {
                let merged = merge_parts(black_box(&snapshot));
                black_box(merged);
            })
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_snapshot");
    let grid = blob_grid(8);
    group.bench_function("blob_17", |b| {
        b.iter(|| {
            black_box(grid.snapshot());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_merge_blob, bench_snapshot);
criterion_main!(benches);
