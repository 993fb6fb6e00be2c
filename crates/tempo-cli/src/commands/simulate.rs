// crates/tempo-cli/src/commands/simulate.rs
//
// `tempo simulate`: run the inflation step over an in-memory chain and
// print how the rate and supply evolve. Uses the default params; nothing is
// written to disk.

use std::collections::BTreeMap;

use chrono::{TimeDelta, TimeZone, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use tempo_core::error::TempoError;
use tempo_core::traits::Ledger;
use tempo_core::types::Amount;
use tempo_inflation::{GenesisState, InflationKeeper};
use tempo_store::MemoryStore;

use crate::output::{format_json, format_table, OutputFormat};

/// Arguments for the simulate command.
#[derive(Debug, Args)]
pub struct SimulateCmd {
    /// Number of blocks to run.
    #[arg(long, default_value_t = 10)]
    pub blocks: u64,

    /// Seconds between consecutive block timestamps.
    #[arg(long, default_value_t = 6)]
    pub block_secs: u64,

    /// Starting total supply in base units.
    #[arg(long, default_value_t = 1_000_000_000_000)]
    pub supply: Amount,

    /// Starting bonded amount in base units.
    #[arg(long, default_value_t = 500_000_000_000)]
    pub bonded: Amount,

    /// Print every Nth block only.
    #[arg(long, default_value_t = 1)]
    pub every: u64,
}

/// One printed simulation row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SimulationRow {
    pub height: u64,
    pub time: String,
    pub inflation: Decimal,
    pub bonded_ratio: Decimal,
    pub minted: Amount,
    pub supply: Amount,
}

/// Ledger held entirely in memory for the simulation.
struct SimulationLedger {
    supply: Amount,
    bonded: Amount,
    balances: BTreeMap<String, Amount>,
}

impl Ledger for SimulationLedger {
    fn total_supply(&self) -> Result<Amount, TempoError> {
        Ok(self.supply)
    }

    fn total_bonded(&self) -> Result<Amount, TempoError> {
        Ok(self.bonded)
    }

    fn mint_and_transfer(&mut self, recipient: &str, amount: Amount) -> Result<(), TempoError> {
        self.supply = self
            .supply
            .checked_add(amount)
            .ok_or_else(|| TempoError::Ledger("Total supply overflow".to_string()))?;
        *self.balances.entry(recipient.to_string()).or_default() += amount;
        Ok(())
    }

    fn balance(&self, address: &str) -> Result<Amount, TempoError> {
        Ok(self.balances.get(address).copied().unwrap_or(0))
    }
}

/// Run the simulate command.
pub fn run(cmd: &SimulateCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let rows = simulate(cmd)?;
    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => println!("{}", format_table(&rows)),
    }
    Ok(())
}

fn simulate(cmd: &SimulateCmd) -> Result<Vec<SimulationRow>, Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let keeper = InflationKeeper::new(&store);
    let genesis_time = Utc
        .timestamp_opt(0, 0)
        .single()
        .ok_or("invalid genesis time")?;
    keeper.init_genesis(&GenesisState::default(), genesis_time)?;

    let mut ledger = SimulationLedger {
        supply: cmd.supply,
        bonded: cmd.bonded,
        balances: BTreeMap::new(),
    };
    let step = TimeDelta::try_seconds(i64::try_from(cmd.block_secs)?).ok_or("block_secs too large")?;
    let every = cmd.every.max(1);

    let mut rows = Vec::new();
    let mut block_time = genesis_time;
    for height in 1..=cmd.blocks {
        block_time = block_time
            .checked_add_signed(step)
            .ok_or("block time out of range")?;
        let outcome = keeper.begin_block(block_time, &mut ledger)?;
        if height % every == 0 || height == cmd.blocks {
            rows.push(SimulationRow {
                height,
                time: block_time.to_rfc3339(),
                inflation: outcome.last_block_info.inflation,
                bonded_ratio: outcome.bonded_ratio.round_dp(6),
                minted: outcome.minted,
                supply: ledger.supply,
            });
        }
    }
    Ok(rows)
}
