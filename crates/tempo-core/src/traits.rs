// crates/tempo-core/src/traits.rs

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TempoError;
use crate::types::Amount;

/// Byte-oriented key-value store owned by the host state machine.
///
/// Implemented by tempo-store (RocksDB, in-memory, and the per-block staged
/// overlay). All access is synchronous: state reads and writes inside a block
/// never suspend.
pub trait KvStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TempoError>;

    /// Write `value` under `key`, overwriting any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), TempoError>;

    /// Remove `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), TempoError>;

    /// Apply a set of writes (`Some` = put, `None` = delete) in order.
    ///
    /// Backends with native batches override this to make the set atomic.
    fn write_batch(&self, ops: Vec<(Vec<u8>, Option<Vec<u8>>)>) -> Result<(), TempoError> {
        for (key, value) in ops {
            match value {
                Some(value) => self.put(&key, &value)?,
                None => self.delete(&key)?,
            }
        }
        Ok(())
    }

    /// Read and JSON-decode the value under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, TempoError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// JSON-encode `value` and write it under `key`.
    fn put_json<T: Serialize>(&self, key: &[u8], value: &T) -> Result<(), TempoError>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec(value)?;
        self.put(key, &bytes)
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TempoError> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), TempoError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), TempoError> {
        (**self).delete(key)
    }

    fn write_batch(&self, ops: Vec<(Vec<u8>, Option<Vec<u8>>)>) -> Result<(), TempoError> {
        (**self).write_batch(ops)
    }
}

/// The host ledger as seen by the issuance module.
///
/// Supply and bonded totals are read-only inputs; `mint_and_transfer` is the
/// only write. A failed mint aborts the whole block, so implementations must
/// not leave partial effects visible outside the block boundary.
pub trait Ledger {
    /// Total supply of the staking token.
    fn total_supply(&self) -> Result<Amount, TempoError>;

    /// Amount of the staking token currently bonded.
    fn total_bonded(&self) -> Result<Amount, TempoError>;

    /// Create `amount` new tokens and credit them to `recipient`.
    fn mint_and_transfer(&mut self, recipient: &str, amount: Amount) -> Result<(), TempoError>;

    /// Balance held by `address`.
    fn balance(&self, address: &str) -> Result<Amount, TempoError>;
}
