// crates/tempo-store/src/rocks.rs
//
// RocksDB-backed persistent storage for module state.
//
// Keys are opaque byte strings chosen by the modules (e.g. `inflation/params`).
// Values are whatever the caller writes; the issuance module stores JSON.
// Batched writes go through a native `WriteBatch` so a committed block lands
// atomically.

use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};

use tempo_core::error::TempoError;
use tempo_core::traits::KvStore;

/// RocksDB wrapper implementing the `KvStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, TempoError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path)
            .map_err(|e| TempoError::Storage(format!("Failed to open RocksDB at {}: {}", path, e)))?;

        tracing::debug!("Opened RocksDB at {}", path);
        Ok(Self { db })
    }

    /// Open an existing database without taking the write lock.
    ///
    /// Used by query tooling that runs next to a live daemon. Writes through
    /// a read-only handle fail with `TempoError::Storage`.
    pub fn open_read_only(path: &str) -> Result<Self, TempoError> {
        let opts = Options::default();
        let db = DBWithThreadMode::<MultiThreaded>::open_for_read_only(&opts, path, false)
            .map_err(|e| {
                TempoError::Storage(format!("Failed to open RocksDB read-only at {}: {}", path, e))
            })?;

        Ok(Self { db })
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TempoError> {
        self.db
            .get(key)
            .map_err(|e| TempoError::Storage(format!("RocksDB get failed: {}", e)))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), TempoError> {
        self.db
            .put(key, value)
            .map_err(|e| TempoError::Storage(format!("RocksDB put failed: {}", e)))
    }

    fn delete(&self, key: &[u8]) -> Result<(), TempoError> {
        self.db
            .delete(key)
            .map_err(|e| TempoError::Storage(format!("RocksDB delete failed: {}", e)))
    }

    fn write_batch(&self, ops: Vec<(Vec<u8>, Option<Vec<u8>>)>) -> Result<(), TempoError> {
        let mut batch = WriteBatch::default();
        for (key, value) in &ops {
            match value {
                Some(value) => batch.put(key, value),
                None => batch.delete(key),
            }
        }
        self.db
            .write(batch)
            .map_err(|e| TempoError::Storage(format!("RocksDB batch write failed: {}", e)))
    }
}
