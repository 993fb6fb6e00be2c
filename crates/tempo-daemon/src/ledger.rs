// crates/tempo-daemon/src/ledger.rs
//
// Simulated host ledger backing the daemon.
//
// Supply, bonded amount and balances live in the same store as the module
// state, so when a block runs over a `StagedStore` its mints commit or roll
// back together with the inflation observation.
//
// Key format:
//   - `bank/supply`             -> JSON u64
//   - `bank/bonded`             -> JSON u64
//   - `bank/balance/{address}`  -> JSON u64

use tempo_core::error::TempoError;
use tempo_core::traits::{KvStore, Ledger};
use tempo_core::types::Amount;

const SUPPLY_KEY: &[u8] = b"bank/supply";
const BONDED_KEY: &[u8] = b"bank/bonded";

fn balance_key(address: &str) -> Vec<u8> {
    format!("bank/balance/{}", address).into_bytes()
}

/// A `Ledger` persisted in a `KvStore`.
pub struct SimLedger<S: KvStore> {
    store: S,
}

impl<S: KvStore> SimLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Seed supply and bonded totals. Used once at genesis.
    pub fn seed(&self, supply: Amount, bonded: Amount) -> Result<(), TempoError> {
        if bonded > supply {
            return Err(TempoError::InvalidState(format!(
                "Bonded amount {} exceeds supply {}",
                bonded, supply
            )));
        }
        self.store.put_json(SUPPLY_KEY, &supply)?;
        self.store.put_json(BONDED_KEY, &bonded)?;
        Ok(())
    }

    /// Move the bonded amount by `delta`, kept within [0, supply].
    pub fn apply_bonded_drift(&self, delta: i64) -> Result<Amount, TempoError> {
        let supply = self.total_supply()?;
        let bonded = self.total_bonded()?;
        let moved = if delta >= 0 {
            bonded.saturating_add(delta.unsigned_abs())
        } else {
            bonded.saturating_sub(delta.unsigned_abs())
        };
        let clamped = moved.min(supply);
        self.store.put_json(BONDED_KEY, &clamped)?;
        Ok(clamped)
    }

    fn read_amount(&self, key: &[u8]) -> Result<Amount, TempoError> {
        self.store
            .get_json(key)?
            .ok_or_else(|| TempoError::NotFound(String::from_utf8_lossy(key).into_owned()))
    }
}

impl<S: KvStore> Ledger for SimLedger<S> {
    fn total_supply(&self) -> Result<Amount, TempoError> {
        self.read_amount(SUPPLY_KEY)
    }

    fn total_bonded(&self) -> Result<Amount, TempoError> {
        self.read_amount(BONDED_KEY)
    }

    fn mint_and_transfer(&mut self, recipient: &str, amount: Amount) -> Result<(), TempoError> {
        let supply = self
            .total_supply()?
            .checked_add(amount)
            .ok_or_else(|| TempoError::Ledger("Total supply overflow".to_string()))?;
        let balance = self
            .balance(recipient)?
            .checked_add(amount)
            .ok_or_else(|| TempoError::Ledger(format!("Balance overflow for {}", recipient)))?;

        self.store.put_json(SUPPLY_KEY, &supply)?;
        self.store.put_json(&balance_key(recipient), &balance)?;
        Ok(())
    }

    fn balance(&self, address: &str) -> Result<Amount, TempoError> {
        Ok(self.store.get_json(&balance_key(address))?.unwrap_or(0))
    }
}
