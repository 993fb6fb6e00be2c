// crates/tempo-inflation/src/keeper.rs
//
// State access and the per-block entry point.
//
// The keeper owns the two singleton records of the module:
//   - `inflation/params`          -> JSON `Params`
//   - `inflation/last_block_info` -> JSON `LastBlockInfo`
//
// It is generic over the host's `KvStore`. Handing it a `StagedStore`
// makes every write of a block (observation and mints alike) commit or
// roll back together with the rest of that block.

use tempo_core::traits::{KvStore, Ledger};
use tempo_core::types::BlockTime;

use crate::controller::{compute_step, StepOutcome};
use crate::error::InflationError;
use crate::params::Params;
use crate::state::LastBlockInfo;

/// Store key of the module parameters.
pub const PARAMS_KEY: &[u8] = b"inflation/params";

/// Store key of the last observation.
pub const LAST_BLOCK_INFO_KEY: &[u8] = b"inflation/last_block_info";

/// Reads and writes the module's state in a host store.
pub struct InflationKeeper<S: KvStore> {
    store: S,
}

impl<S: KvStore> InflationKeeper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back (e.g. to commit a staged block).
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Current parameters.
    pub fn params(&self) -> Result<Params, InflationError> {
        self.store
            .get_json(PARAMS_KEY)?
            .ok_or(InflationError::MissingState("params"))
    }

    /// Validate and store a new parameter set, replacing the old one.
    ///
    /// On a validation failure nothing is written.
    pub fn set_params(&self, params: &Params) -> Result<(), InflationError> {
        params.validate()?;
        self.store.put_json(PARAMS_KEY, params)?;
        tracing::info!(
            min_inflation = %params.min_inflation,
            max_inflation = %params.max_inflation,
            min_bonded = %params.min_bonded,
            max_bonded = %params.max_bonded,
            recipients = params.inflation_recipients.len(),
            "Inflation params updated"
        );
        Ok(())
    }

    /// Current observation.
    pub fn last_block_info(&self) -> Result<LastBlockInfo, InflationError> {
        self.store
            .get_json(LAST_BLOCK_INFO_KEY)?
            .ok_or(InflationError::MissingState("last block info"))
    }

    /// Overwrite the observation.
    pub fn set_last_block_info(&self, info: &LastBlockInfo) -> Result<(), InflationError> {
        self.store.put_json(LAST_BLOCK_INFO_KEY, info)?;
        Ok(())
    }

    /// Whether genesis has run against this store.
    pub fn is_initialized(&self) -> Result<bool, InflationError> {
        Ok(self.store.get(PARAMS_KEY)?.is_some())
    }

    /// Run the inflation step for the block at `block_time`.
    ///
    /// Reads supply and bonded totals from `ledger`, writes the new
    /// observation, then mints each non-zero allocation. Any error leaves
    /// partial writes in the store; the caller must discard the block.
    pub fn begin_block<L: Ledger>(
        &self,
        block_time: BlockTime,
        ledger: &mut L,
    ) -> Result<StepOutcome, InflationError> {
        let params = self.params()?;
        let last = self.last_block_info()?;
        let total_supply = ledger.total_supply()?;
        let total_bonded = ledger.total_bonded()?;

        if total_bonded > total_supply {
            tracing::warn!(
                total_bonded,
                total_supply,
                "Bonded amount exceeds total supply"
            );
        }

        let outcome = compute_step(&last, &params, block_time, total_supply, total_bonded)?;

        if outcome.elapsed_capped {
            tracing::warn!(
                last_time = %last.time,
                block_time = %block_time,
                credited_secs = %outcome.elapsed_secs,
                "Block gap exceeds max_block_duration; elapsed time capped"
            );
        }

        self.set_last_block_info(&outcome.last_block_info)?;

        for allocation in &outcome.allocations {
            if allocation.amount == 0 {
                continue;
            }
            ledger.mint_and_transfer(&allocation.address, allocation.amount)?;
            tracing::debug!(
                recipient = %allocation.address,
                amount = allocation.amount,
                "Minted inflation allocation"
            );
        }

        tracing::info!(
            block_time = %block_time,
            inflation = %outcome.last_block_info.inflation,
            bonded_ratio = %outcome.bonded_ratio,
            elapsed_secs = %outcome.elapsed_secs,
            minted = outcome.minted,
            "Inflation step applied"
        );

        Ok(outcome)
    }
}
