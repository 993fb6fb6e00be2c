// crates/tempo-daemon/src/chain.rs
//
// Block production loop for the Tempo daemon.
//
// Each block runs inside a `StagedStore` over the node database: simulated
// bonding drift, the inflation step, its mints, and the new height are all
// buffered and committed in one batch. A failed block is discarded and the
// loop halts; the next start resumes from the last committed block.
//
// Block timestamps are derived, not read from the wall clock: each block is
// `block_time_secs` after the previous observation.

use std::time::Duration;

use chrono::TimeDelta;

use tempo_core::error::TempoError;
use tempo_core::traits::KvStore;
use tempo_core::types::{Amount, BlockTime};
use tempo_inflation::{GenesisState, InflationError, InflationKeeper, StepOutcome};
use tempo_store::StagedStore;

use crate::ledger::SimLedger;

/// Store key of the last committed block height.
pub const HEIGHT_KEY: &[u8] = b"chain/height";

/// Result of one committed block.
#[derive(Debug, Clone)]
pub struct BlockSummary {
    pub height: u64,
    pub outcome: StepOutcome,
}

/// Produces blocks against a node store.
pub struct BlockRunner<S: KvStore> {
    store: S,
    /// Seconds each block advances the chain timestamp by.
    block_time_secs: u64,
    /// Simulated change to the bonded amount per block.
    bonded_drift: i64,
}

impl<S: KvStore> BlockRunner<S> {
    pub fn new(store: S, block_time_secs: u64, bonded_drift: i64) -> Self {
        Self {
            store,
            block_time_secs,
            bonded_drift,
        }
    }

    /// Initialize module state and the simulated ledger if the store is empty.
    ///
    /// Returns `false` when the store was already initialized.
    pub fn init_genesis(
        &self,
        genesis: &GenesisState,
        genesis_time: BlockTime,
        initial_supply: Amount,
        initial_bonded: Amount,
    ) -> Result<bool, InflationError> {
        if InflationKeeper::new(&self.store).is_initialized()? {
            return Ok(false);
        }

        let staged = StagedStore::new(&self.store);
        let result = write_genesis(&staged, genesis, genesis_time, initial_supply, initial_bonded);
        match result {
            Ok(()) => {
                staged.commit()?;
                Ok(true)
            }
            Err(e) => {
                staged.discard();
                Err(e)
            }
        }
    }

    /// Height of the last committed block (0 right after genesis).
    pub fn height(&self) -> Result<u64, TempoError> {
        Ok(self.store.get_json(HEIGHT_KEY)?.unwrap_or(0))
    }

    /// Execute and commit the next block.
    pub fn produce_block(&self) -> Result<BlockSummary, InflationError> {
        let height = self.height()? + 1;
        let staged = StagedStore::new(&self.store);

        match execute_block(&staged, height, self.block_time_secs, self.bonded_drift) {
            Ok(outcome) => {
                staged.commit()?;
                Ok(BlockSummary { height, outcome })
            }
            Err(e) => {
                staged.discard();
                Err(e)
            }
        }
    }

    /// Produce blocks every `interval` until interrupted, `max_blocks` blocks
    /// have been produced (0 = unbounded), or a block fails.
    pub async fn run(
        &self,
        interval: Duration,
        max_blocks: u64,
    ) -> Result<u64, Box<dyn std::error::Error>> {
        tracing::info!(
            "Block runner started (interval={}ms, block_time={}s, start_height={})",
            interval.as_millis(),
            self.block_time_secs,
            self.height()?
        );

        let mut produced = 0u64;
        loop {
            if max_blocks > 0 && produced >= max_blocks {
                tracing::info!("Reached max_blocks={}, stopping", max_blocks);
                break;
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Block runner received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(interval) => {
                    match self.produce_block() {
                        Ok(summary) => {
                            produced += 1;
                            tracing::debug!(
                                "Committed block {} (minted {})",
                                summary.height,
                                summary.outcome.minted
                            );
                        }
                        Err(e) if e.is_invariant_violation() => {
                            tracing::error!(
                                "Invariant violation at block {}: {}. Halting block processing; \
                                 state left at the last committed block.",
                                self.height().unwrap_or_default() + 1,
                                e
                            );
                            return Err(e.into());
                        }
                        Err(e) => {
                            tracing::error!("Block failed: {}. Halting block processing.", e);
                            return Err(e.into());
                        }
                    }
                }
            }
        }

        Ok(produced)
    }
}

fn write_genesis<S: KvStore>(
    staged: &StagedStore<S>,
    genesis: &GenesisState,
    genesis_time: BlockTime,
    initial_supply: Amount,
    initial_bonded: Amount,
) -> Result<(), InflationError> {
    InflationKeeper::new(staged).init_genesis(genesis, genesis_time)?;
    SimLedger::new(staged).seed(initial_supply, initial_bonded)?;
    staged.put_json(HEIGHT_KEY, &0u64)?;
    Ok(())
}

fn execute_block<S: KvStore>(
    staged: &StagedStore<S>,
    height: u64,
    block_time_secs: u64,
    bonded_drift: i64,
) -> Result<StepOutcome, InflationError> {
    let keeper = InflationKeeper::new(staged);
    let mut ledger = SimLedger::new(staged);

    if bonded_drift != 0 {
        ledger.apply_bonded_drift(bonded_drift)?;
    }

    let last = keeper.last_block_info()?;
    let step = i64::try_from(block_time_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or(InflationError::ArithmeticOverflow("block time"))?;
    let block_time = last
        .time
        .checked_add_signed(step)
        .ok_or(InflationError::ArithmeticOverflow("block time"))?;

    let outcome = keeper.begin_block(block_time, &mut ledger)?;
    staged.put_json(HEIGHT_KEY, &height)?;
    Ok(outcome)
}
