//! Headless demo: a random point producer feeding the sparse grid, with
//! merge results logged as they publish. The display layer this would feed
//! is external; the loop stands in for it by polling the merger.

mod config;
mod producer;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use crate::config::DemoConfig;
use crate::producer::{PointProducer, RandomProducer};
use isosurf_geom::Vec3;
use isosurf_grid::SparseGrid;
use isosurf_merge::{MergedMesh, Merger};

#[derive(Parser, Debug)]
#[command(name = "isosurf", about = "Incremental iso-surface extraction demo")]
struct Args {
    /// TOML config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Grid cells per world unit (power of two recommended).
    #[arg(long)]
    resolution: Option<i32>,
    /// Producer steps to run.
    #[arg(long)]
    ticks: Option<u32>,
    /// RNG seed for the point producer.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = DemoConfig::load(args.config.as_deref())?;
    if let Some(r) = args.resolution {
        cfg.resolution = r;
    }
    if let Some(t) = args.ticks {
        cfg.ticks = t;
    }
    if let Some(s) = args.seed {
        cfg.seed = s;
    }

    run(&cfg)
}

fn run(cfg: &DemoConfig) -> Result<(), Box<dyn Error>> {
    let mut grid = SparseGrid::new(cfg.resolution)?;
    let merger = Merger::new();
    let mut producer = RandomProducer::new(cfg.seed, Vec3::ZERO, cfg.range);

    log::info!(
        target: "demo",
        "running {} ticks at resolution {} (seed {:#x})",
        cfg.ticks,
        cfg.resolution,
        cfg.seed
    );

    let mut published: Arc<MergedMesh> = merger.latest();
    let mut merges_done = 0u64;
    let mut merges_dropped = 0u64;

    for tick in 0..cfg.ticks {
        let changed = producer.step(&mut grid);

        if !changed.is_empty() && merger.submit(grid.snapshot()).is_none() {
            merges_dropped += 1;
        }

        for out in merger.drain_results() {
            log::debug!(
                target: "demo",
                "[tick {tick}] merge {} published: {} verts, {} tris, {} ms",
                out.job_id,
                out.mesh.vertex_count(),
                out.mesh.triangle_count(),
                out.t_merge_ms
            );
            published = out.mesh;
            merges_done += 1;
        }

        if cfg.tick_ms > 0 {
            thread::sleep(Duration::from_millis(cfg.tick_ms));
        }
    }

    // Let a still-running merge publish before reporting.
    while merger.is_busy() {
        thread::sleep(Duration::from_millis(1));
    }
    for out in merger.drain_results() {
        published = out.mesh;
        merges_done += 1;
    }

    let stats = grid.stats();
    log::info!(
        target: "demo",
        "done: {} nodes ({} interior, {} boundary), {} merges published, {} dropped",
        stats.nodes,
        stats.interior,
        stats.boundary,
        merges_done,
        merges_dropped
    );
    log::info!(
        target: "demo",
        "final surface: {} verts, {} tris",
        published.vertex_count(),
        published.triangle_count()
    );

    Ok(())
}
