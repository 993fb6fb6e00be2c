// crates/tempo-inflation/tests/block_sequence.rs
//
// Multi-block runs of the inflation keeper against an in-memory host:
// drift toward the band, cadence independence, staged rollback, and the
// worked examples from the design notes.

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use tempo_core::error::TempoError;
use tempo_core::traits::{KvStore, Ledger};
use tempo_core::types::{Amount, BlockTime};
use tempo_inflation::controller::{adjust_inflation, credited_elapsed, mint_amount};
use tempo_inflation::{
    GenesisState, InflationKeeper, InflationRecipient, LastBlockInfo, Params, YEAR_DURATION_SECS,
};
use tempo_store::{MemoryStore, StagedStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Host ledger with a fixed bonded amount.
#[derive(Debug, Clone)]
struct FixedBondLedger {
    supply: Amount,
    bonded: Amount,
    balances: BTreeMap<String, Amount>,
}

impl FixedBondLedger {
    fn new(supply: Amount, bonded: Amount) -> Self {
        Self {
            supply,
            bonded,
            balances: BTreeMap::new(),
        }
    }
}

impl Ledger for FixedBondLedger {
    fn total_supply(&self) -> Result<Amount, TempoError> {
        Ok(self.supply)
    }

    fn total_bonded(&self) -> Result<Amount, TempoError> {
        Ok(self.bonded)
    }

    fn mint_and_transfer(&mut self, recipient: &str, amount: Amount) -> Result<(), TempoError> {
        self.supply += amount;
        *self.balances.entry(recipient.to_string()).or_default() += amount;
        Ok(())
    }

    fn balance(&self, address: &str) -> Result<Amount, TempoError> {
        Ok(self.balances.get(address).copied().unwrap_or(0))
    }
}

fn pct(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

fn genesis_time() -> BlockTime {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// The parameter set used by the worked examples.
fn example_params() -> Params {
    Params {
        min_inflation: pct(5),
        max_inflation: pct(20),
        min_bonded: pct(60),
        max_bonded: pct(80),
        inflation_change: Decimal::new(1, 6),
        max_block_duration_secs: 60,
        inflation_recipients: vec![
            InflationRecipient::new("validators", pct(60)),
            InflationRecipient::new("community_pool", pct(25)),
            InflationRecipient::new("dev_fund", pct(15)),
        ],
    }
}

fn keeper_with(store: &MemoryStore, params: Params, inflation: Decimal) -> InflationKeeper<&MemoryStore> {
    let keeper = InflationKeeper::new(store);
    let genesis = GenesisState::new(params, Some(LastBlockInfo::new(inflation, genesis_time())));
    keeper.init_genesis(&genesis, genesis_time()).unwrap();
    keeper
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn example_below_band_ten_seconds() {
    let params = example_params();
    let (elapsed, capped) =
        credited_elapsed(genesis_time(), genesis_time() + Duration::seconds(10), &params).unwrap();
    assert!(!capped);
    let next = adjust_inflation(pct(10), pct(50), elapsed, &params).unwrap();
    assert_eq!(next, Decimal::new(10001, 5));
}

#[test]
fn example_long_gap_clamped_to_cap() {
    let params = example_params();
    let (elapsed, capped) = credited_elapsed(
        genesis_time(),
        genesis_time() + Duration::seconds(1_000_000),
        &params,
    )
    .unwrap();
    assert!(capped);
    assert_eq!(elapsed, Decimal::from(60));
}

#[test]
fn example_full_year_mint() {
    let year = Decimal::from(YEAR_DURATION_SECS);
    assert_eq!(mint_amount(pct(15), 1_000_000, year).unwrap(), 150_000);

    // Through the keeper, with the cap wide enough to credit the whole year.
    let params = Params {
        max_block_duration_secs: YEAR_DURATION_SECS,
        inflation_change: Decimal::ZERO,
        min_inflation: pct(15),
        max_inflation: pct(15),
        ..example_params()
    };
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, params, pct(15));
    let mut ledger = FixedBondLedger::new(1_000_000, 700_000);

    let outcome = keeper
        .begin_block(genesis_time() + Duration::days(365), &mut ledger)
        .unwrap();
    assert_eq!(outcome.minted, 150_000);
    assert_eq!(ledger.balance("validators").unwrap(), 90_000);
    assert_eq!(ledger.balance("community_pool").unwrap(), 37_500);
    assert_eq!(ledger.balance("dev_fund").unwrap(), 22_500);
    assert_eq!(ledger.supply, 1_150_000);
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[test]
fn under_bonded_chain_drifts_up_to_max() {
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, example_params(), pct(10));
    let mut ledger = FixedBondLedger::new(1_000_000_000, 100_000_000);

    let mut t = genesis_time();
    let mut previous = pct(10);
    for _ in 0..2_000 {
        t += Duration::seconds(60);
        let outcome = keeper.begin_block(t, &mut ledger).unwrap();
        let current = outcome.last_block_info.inflation;
        assert!(current >= previous);
        assert!(current <= pct(20));
        previous = current;
    }
    // 0.10 + 2000 * 60 * 0.000001 = 0.22, clamped.
    assert_eq!(previous, pct(20));
}

#[test]
fn in_band_chain_keeps_rate() {
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, example_params(), pct(12));
    let mut ledger = FixedBondLedger::new(1_000_000_000, 700_000_000);

    let mut t = genesis_time();
    for i in 0..100 {
        t += Duration::seconds(1 + i % 7);
        let outcome = keeper.begin_block(t, &mut ledger).unwrap();
        assert_eq!(outcome.last_block_info.inflation, pct(12));
    }
}

#[test]
fn drift_is_independent_of_block_cadence() {
    // Same 600 seconds, once as 100 blocks of 6s and once as 10 blocks of 60s.
    let run = |block_secs: i64, blocks: usize| {
        let store = MemoryStore::new();
        let keeper = keeper_with(&store, example_params(), pct(10));
        let mut ledger = FixedBondLedger::new(1_000_000_000, 500_000_000);
        let mut t = genesis_time();
        for _ in 0..blocks {
            t += Duration::seconds(block_secs);
            keeper.begin_block(t, &mut ledger).unwrap();
        }
        keeper.last_block_info().unwrap().inflation
    };

    let fast = run(6, 100);
    let slow = run(60, 10);
    assert_eq!(fast, slow);
    assert_eq!(fast, Decimal::new(10060, 5));
}

#[test]
fn minted_supply_accumulates_exactly() {
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, example_params(), pct(10));
    let mut ledger = FixedBondLedger::new(5_000_000_000_000, 3_500_000_000_000);
    let start = ledger.supply;

    let mut t = genesis_time();
    let mut total_minted: Amount = 0;
    for i in 0..50 {
        t += Duration::milliseconds(4_000 + 137 * i);
        total_minted += keeper.begin_block(t, &mut ledger).unwrap().minted;
    }

    let credited: Amount = ledger.balances.values().sum();
    assert_eq!(credited, total_minted);
    assert_eq!(ledger.supply, start + total_minted);
}

#[test]
fn failed_block_rolls_back_with_staged_store() {
    let base = MemoryStore::new();
    keeper_with(&base, example_params(), pct(10));
    let before = InflationKeeper::new(&base).last_block_info().unwrap();

    // A valid step inside a staged block that the host then abandons.
    let keeper = InflationKeeper::new(StagedStore::new(&base));
    let mut ledger = FixedBondLedger::new(1_000_000, 500_000);
    keeper
        .begin_block(genesis_time() + Duration::seconds(5), &mut ledger)
        .unwrap();
    assert_ne!(keeper.last_block_info().unwrap(), before);
    keeper.into_inner().discard();

    assert_eq!(InflationKeeper::new(&base).last_block_info().unwrap(), before);
}

#[test]
fn committed_block_is_visible_in_parent() {
    let base = MemoryStore::new();
    keeper_with(&base, example_params(), pct(10));

    let keeper = InflationKeeper::new(StagedStore::new(&base));
    let mut ledger = FixedBondLedger::new(1_000_000, 500_000);
    let outcome = keeper
        .begin_block(genesis_time() + Duration::seconds(5), &mut ledger)
        .unwrap();
    keeper.into_inner().commit().unwrap();

    assert_eq!(
        InflationKeeper::new(&base).last_block_info().unwrap(),
        outcome.last_block_info
    );
}

#[test]
fn params_update_takes_effect_next_block() {
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, example_params(), pct(10));
    let mut ledger = FixedBondLedger::new(1_000_000_000, 500_000_000);

    keeper
        .begin_block(genesis_time() + Duration::seconds(10), &mut ledger)
        .unwrap();

    // Governance freezes the rate at 8%.
    let frozen = Params {
        min_inflation: pct(8),
        max_inflation: pct(8),
        ..example_params()
    };
    keeper.set_params(&frozen).unwrap();
    let outcome = keeper
        .begin_block(genesis_time() + Duration::seconds(20), &mut ledger)
        .unwrap();
    assert_eq!(outcome.last_block_info.inflation, pct(8));
}

#[test]
fn observation_is_single_record() {
    let store = MemoryStore::new();
    let keeper = keeper_with(&store, example_params(), pct(10));
    let mut ledger = FixedBondLedger::new(1_000_000, 500_000);
    let keys_before = store.len().unwrap();

    let mut t = genesis_time();
    for _ in 0..10 {
        t += Duration::seconds(3);
        keeper.begin_block(t, &mut ledger).unwrap();
    }
    assert_eq!(store.len().unwrap(), keys_before);
    assert!(store.get(tempo_inflation::LAST_BLOCK_INFO_KEY).unwrap().is_some());
}
