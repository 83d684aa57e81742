//! Per-source job snapshots and the merged display list.

use std::sync::Mutex;

use aigis_models::{JobKind, JobRecord};

/// Holds the most recent successfully fetched collection per source and
/// produces the merged view.
///
/// Each source is replaced independently: a failed fetch never touches the
/// other source's snapshot or clears its own, so the display never flashes
/// empty on a transient failure. An empty collection is a valid snapshot,
/// distinct from "fetch failed".
#[derive(Debug, Default)]
pub struct JobStore {
    inner: Mutex<Snapshots>,
}

#[derive(Debug, Default)]
struct Snapshots {
    clip: Vec<JobRecord>,
    generate: Vec<JobRecord>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one source's snapshot wholesale.
    ///
    /// Only called with successfully fetched, normalized collections; the
    /// poller never applies a failed fetch.
    pub fn apply(&self, kind: JobKind, records: Vec<JobRecord>) {
        let mut inner = self.inner.lock().expect("job store lock poisoned");
        match kind {
            JobKind::Clip => inner.clip = records,
            JobKind::Generate => inner.generate = records,
        }
    }

    /// The merged display list: both snapshots concatenated and stable-sorted
    /// descending by creation time.
    ///
    /// The sort must be stable: many jobs carry `created_at = 0` and their
    /// relative (recency-approximating) input order has to survive. Records
    /// are keyed by `(kind, id)`, so the same id appearing in both sources
    /// yields two entries.
    pub fn merged(&self) -> Vec<JobRecord> {
        let inner = self.inner.lock().expect("job store lock poisoned");
        let mut all: Vec<JobRecord> = inner
            .clip
            .iter()
            .chain(inner.generate.iter())
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.total_cmp(&a.created_at));
        all
    }
}
