use crate::error::Result;
use crate::fs::write_snapshot;
use crate::stock::sec::ownership::OwnershipRow;
use rayon::slice::ParallelSliceMut;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// The run's accumulated rows, shared by every pipeline step.
///
/// `add` and `save` are the only ways to mutate it, and both go through one lock. When a
/// snapshot path is configured, every `period`-th batch triggers a save while the lock is
/// still held, so a snapshot is always a complete and sorted view of the rows.
#[derive(Debug)]
pub struct Store {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: Vec<OwnershipRow>,
    snapshot: Option<PathBuf>,
    period: usize,
    countdown: usize,
}

impl Store {
    /// A store seeded with `rows`, autosaving to `snapshot` every `period` batches.
    pub fn new(rows: Vec<OwnershipRow>, snapshot: Option<PathBuf>, period: usize) -> Self {
        let period = period.max(1);
        Self {
            inner: Mutex::new(Inner {
                rows,
                snapshot,
                period,
                countdown: period,
            }),
        }
    }

    /// An in-memory store that never writes a snapshot.
    pub fn in_memory() -> Self {
        Self::new(vec![], None, 1)
    }

    /// Append one batch of rows, saving if the autosave countdown runs out.
    pub async fn add(&self, rows: Vec<OwnershipRow>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        trace!("storing {} rows", rows.len());
        inner.rows.extend(rows);

        if inner.snapshot.is_some() {
            inner.countdown -= 1;
            if inner.countdown == 0 {
                inner.countdown = inner.period;
                inner.save().await?;
            }
            trace!("saving in {} batches", inner.countdown);
        }

        Ok(())
    }

    /// Sort the rows by `(date, owner)` and write the snapshot, if one is configured.
    pub async fn save(&self) -> Result<()> {
        self.inner.lock().await.save().await
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.rows.is_empty()
    }

    /// A copy of the rows, in their current order.
    pub async fn rows(&self) -> Vec<OwnershipRow> {
        self.inner.lock().await.rows.clone()
    }

    pub fn into_rows(self) -> Vec<OwnershipRow> {
        self.inner.into_inner().rows
    }
}

impl Inner {
    // callers already hold the lock
    async fn save(&mut self) -> Result<()> {
        // par_sort_by is stable: exact (date, owner) ties keep their insertion order
        self.rows
            .par_sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.owner.cmp(&b.owner)));

        if let Some(path) = &self.snapshot {
            write_snapshot(path, &self.rows).await?;
            debug!("{} rows saved to {path:?}", self.rows.len());
        }

        Ok(())
    }
}
