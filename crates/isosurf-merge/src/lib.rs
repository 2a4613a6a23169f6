//! Fragment merge and the drop-if-busy background merge worker.
//!
//! The merge itself is a pure concatenation over a value snapshot of the
//! grid; the worker wraps it in a single background thread guarded by one
//! busy flag. A submission that arrives while a merge is running is dropped
//! outright (not queued, not blocked) and the previously published buffer
//! stays current until the running merge publishes.
#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use isosurf_grid::NodeSnapshot;

/// Combined vertex/index/color buffer for the display layer.
///
/// Positions are interleaved `x,y,z`; indices are triangle triples into the
/// vertex array with a full 32-bit index space; colors are interleaved
/// `r,g,b,a`, one per vertex. A published buffer is immutable until
/// replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedMesh {
    pub pos: Vec<f32>,
    pub idx: Vec<u32>,
    pub col: Vec<u8>,
}

impl MergedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }
}

/// Concatenates every boundary node's fragment into one buffer.
///
/// Fully-interior (`NONE`) and fully-exterior (`ALL`) configurations carry
/// no surface and are skipped; everything else is appended in snapshot
/// order with triangle indices rebased by the running vertex count and the
/// flat fragment color expanded per vertex.
pub fn merge_parts(snapshot: &[NodeSnapshot]) -> MergedMesh {
    let mut mesh = MergedMesh::default();
    for snap in snapshot {
        if snap.vacant.is_none() || snap.vacant.is_all() {
            continue;
        }
        let part = &snap.part;
        let base = (mesh.pos.len() / 3) as u32;
        for v in &part.verts {
            mesh.pos.extend_from_slice(&[v.x, v.y, v.z]);
            mesh.col.extend_from_slice(&part.color);
        }
        for &t in &part.tris {
            mesh.idx.push(base + t);
        }
    }
    mesh
}

/// One merge request: a value snapshot taken at submission time.
pub struct MergeJob {
    pub job_id: u64,
    pub snapshot: Vec<NodeSnapshot>,
}

/// One completed merge.
pub struct MergeOut {
    pub job_id: u64,
    pub mesh: Arc<MergedMesh>,
    pub t_merge_ms: u32,
}

/// Background merge worker with an at-most-one-in-flight guarantee.
pub struct Merger {
    job_tx: Sender<MergeJob>,
    res_rx: Receiver<MergeOut>,
    busy: Arc<AtomicBool>,
    latest: Arc<Mutex<Arc<MergedMesh>>>,
    next_job_id: AtomicU64,
    _worker: thread::JoinHandle<()>,
}

impl Merger {
    pub fn new() -> Self {
        let (job_tx, job_rx) = unbounded::<MergeJob>();
        let (res_tx, res_rx) = unbounded::<MergeOut>();
        let busy = Arc::new(AtomicBool::new(false));
        let latest = Arc::new(Mutex::new(Arc::new(MergedMesh::default())));

        let worker = {
            let busy = busy.clone();
            let latest = latest.clone();
            thread::spawn(move || {
                while let Ok(job) = job_rx.recv() {
                    let t0 = Instant::now();
                    let mesh = Arc::new(merge_parts(&job.snapshot));
                    let t_merge_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                    log::debug!(
                        target: "merge",
                        "job {} merged {} verts / {} tris in {} ms",
                        job.job_id,
                        mesh.vertex_count(),
                        mesh.triangle_count(),
                        t_merge_ms
                    );
                    publish(&latest, mesh.clone());
                    let _ = res_tx.send(MergeOut {
                        job_id: job.job_id,
                        mesh,
                        t_merge_ms,
                    });
                    // Publish before clearing the flag so a submitter that
                    // sees "idle" also sees the finished buffer.
                    busy.store(false, Ordering::Release);
                }
            })
        };

        Self {
            job_tx,
            res_rx,
            busy,
            latest,
            next_job_id: AtomicU64::new(0),
            _worker: worker,
        }
    }

    /// Submits a snapshot for merging unless a merge is already in flight.
    /// Returns the job id, or `None` when the request was dropped; a drop
    /// is a normal outcome, the caller keeps using the previous buffer.
    pub fn submit(&self, snapshot: Vec<NodeSnapshot>) -> Option<u64> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::trace!(target: "merge", "merge in flight, dropping request");
            return None;
        }
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed) + 1;
        if self.job_tx.send(MergeJob { job_id, snapshot }).is_err() {
            // Worker is gone; nothing will clear the flag, so do it here.
            self.busy.store(false, Ordering::Release);
            return None;
        }
        Some(job_id)
    }

    /// Whether a merge is currently running.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The most recently published buffer. Never blocks on the merge
    /// itself; publication is a pointer swap under a short lock.
    pub fn latest(&self) -> Arc<MergedMesh> {
        match self.latest.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drains completed merges without blocking.
    pub fn drain_results(&self) -> Vec<MergeOut> {
        self.res_rx.try_iter().collect()
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

fn publish(slot: &Mutex<Arc<MergedMesh>>, mesh: Arc<MergedMesh>) {
    match slot.lock() {
        Ok(mut slot) => *slot = mesh,
        Err(poisoned) => *poisoned.into_inner() = mesh,
    }
}
