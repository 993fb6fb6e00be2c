// crates/tempo-store/src/memory.rs
//
// In-memory `KvStore` for tests and offline simulation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tempo_core::error::TempoError;
use tempo_core::traits::KvStore;

/// A `BTreeMap` behind a lock. Ordered so dumps are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize, TempoError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.len())
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> Result<bool, TempoError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> TempoError {
    TempoError::Storage("In-memory store lock poisoned".to_string())
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TempoError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), TempoError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), TempoError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn write_batch(&self, ops: Vec<(Vec<u8>, Option<Vec<u8>>)>) -> Result<(), TempoError> {
        // One lock acquisition so readers never observe half a batch.
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        for (key, value) in ops {
            match value {
                Some(value) => {
                    entries.insert(key, value);
                }
                None => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
