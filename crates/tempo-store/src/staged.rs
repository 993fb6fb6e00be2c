// crates/tempo-store/src/staged.rs
//
// Per-block write buffer.
//
// A `StagedStore` wraps a parent store and records every put/delete in an
// ordered overlay. Reads see the overlay first, then the parent. Nothing
// reaches the parent until `commit`, which hands the whole overlay to the
// parent's `write_batch`. Dropping or calling `discard` throws the block's
// writes away, which is how a failed block is rolled back.

use std::cell::RefCell;
use std::collections::BTreeMap;

use tempo_core::error::TempoError;
use tempo_core::traits::KvStore;

/// Buffered overlay over a parent `KvStore`.
///
/// Single-threaded by construction (`RefCell`): a block is executed by one
/// thread from start to commit.
pub struct StagedStore<S: KvStore> {
    parent: S,
    /// `Some(bytes)` = pending put, `None` = pending delete.
    pending: RefCell<BTreeMap<Vec<u8>, Option<Vec<u8>>>>,
}

impl<S: KvStore> StagedStore<S> {
    /// Start a new, empty overlay over `parent`.
    pub fn new(parent: S) -> Self {
        Self {
            parent,
            pending: RefCell::new(BTreeMap::new()),
        }
    }

    /// Number of keys written (or deleted) in this overlay.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Flush all pending writes to the parent in one batch.
    pub fn commit(self) -> Result<S, TempoError> {
        let ops: Vec<(Vec<u8>, Option<Vec<u8>>)> = self.pending.into_inner().into_iter().collect();
        let count = ops.len();
        self.parent.write_batch(ops)?;
        tracing::trace!("Committed {} staged writes", count);
        Ok(self.parent)
    }

    /// Drop all pending writes and return the untouched parent.
    pub fn discard(self) -> S {
        let count = self.pending.borrow().len();
        if count > 0 {
            tracing::debug!("Discarded {} staged writes", count);
        }
        self.parent
    }
}

impl<S: KvStore> KvStore for StagedStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TempoError> {
        if let Some(pending) = self.pending.borrow().get(key) {
            return Ok(pending.clone());
        }
        self.parent.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), TempoError> {
        self.pending
            .borrow_mut()
            .insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), TempoError> {
        self.pending.borrow_mut().insert(key.to_vec(), None);
        Ok(())
    }
}
