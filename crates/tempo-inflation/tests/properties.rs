// crates/tempo-inflation/tests/properties.rs
//
// Property-based checks of the controller step.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use tempo_core::types::{Amount, BlockTime};
use tempo_inflation::controller::{compute_step, split_mint};
use tempo_inflation::{InflationRecipient, LastBlockInfo, Params, ParamsError};

fn genesis_time() -> BlockTime {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A fraction in [0, 1] with four decimal places.
fn fraction() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|n| Decimal::new(n, 4))
}

/// A valid parameter set with 1..6 recipients whose shares sum to 1.
fn valid_params() -> impl Strategy<Value = Params> {
    (
        fraction(),
        fraction(),
        fraction(),
        fraction(),
        0i64..=1_000,
        1u64..=3_600,
        prop::collection::vec(1i64..=100, 1..6),
    )
        .prop_map(|(a, b, c, d, change, cap, weights)| {
            let total: i64 = weights.iter().sum();
            // Shares in basis points; the last absorbs the rounding so the sum is exact.
            let mut recipients = Vec::with_capacity(weights.len());
            let mut assigned = 0i64;
            for (i, w) in weights.iter().enumerate() {
                let bps = if i + 1 == weights.len() {
                    10_000 - assigned
                } else {
                    w * 10_000 / total
                };
                assigned += bps;
                recipients.push(InflationRecipient::new(format!("r{}", i), Decimal::new(bps, 4)));
            }
            Params {
                min_inflation: a.min(b),
                max_inflation: a.max(b),
                min_bonded: c.min(d),
                max_bonded: c.max(d),
                inflation_change: Decimal::new(change, 9),
                max_block_duration_secs: cap,
                inflation_recipients: recipients,
            }
        })
}

proptest! {
    #[test]
    fn generated_params_validate(params in valid_params()) {
        prop_assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn inflation_stays_within_bounds(
        params in valid_params(),
        start in fraction(),
        gap_ms in 0i64..=10_000_000,
        supply in 1u64..=1_000_000_000_000_000,
        bonded_frac in fraction(),
    ) {
        let bonded = (Decimal::from(supply) * bonded_frac).trunc().to_u64().unwrap_or(0);
        let last = LastBlockInfo::new(start, genesis_time());
        let outcome = compute_step(
            &last,
            &params,
            genesis_time() + Duration::milliseconds(gap_ms),
            supply,
            bonded,
        ).unwrap();

        let inflation = outcome.last_block_info.inflation;
        prop_assert!(inflation >= params.min_inflation);
        prop_assert!(inflation <= params.max_inflation);
    }

    #[test]
    fn credited_elapsed_never_exceeds_cap(
        params in valid_params(),
        gap_secs in 0i64..=100_000_000,
    ) {
        let last = LastBlockInfo::new(params.min_inflation, genesis_time());
        let outcome = compute_step(
            &last,
            &params,
            genesis_time() + Duration::seconds(gap_secs),
            1_000_000,
            500_000,
        ).unwrap();
        prop_assert!(outcome.elapsed_secs <= Decimal::from(params.max_block_duration_secs));
        prop_assert_eq!(outcome.elapsed_capped, gap_secs as u64 > params.max_block_duration_secs);
    }

    #[test]
    fn allocations_sum_to_minted(params in valid_params(), minted in 0u64..=u64::MAX / 2) {
        let allocations = split_mint(minted, &params.inflation_recipients).unwrap();
        prop_assert_eq!(allocations.len(), params.inflation_recipients.len());
        let sum: Amount = allocations.iter().map(|a| a.amount).sum();
        prop_assert_eq!(sum, minted);
    }

    #[test]
    fn in_band_rate_is_stable(
        params in valid_params(),
        steps in prop::collection::vec(1i64..=120, 1..20),
    ) {
        // Bond exactly at the midpoint of the band.
        let supply: Amount = 1_000_000_000;
        let mid = (params.min_bonded + params.max_bonded) / Decimal::from(2);
        let bonded: Amount = (Decimal::from(supply) * mid).trunc().to_u64().unwrap();
        prop_assume!({
            let ratio = Decimal::from(bonded) / Decimal::from(supply);
            ratio >= params.min_bonded && ratio <= params.max_bonded
        });

        let start = params.min_inflation;
        let mut last = LastBlockInfo::new(start, genesis_time());
        for secs in steps {
            let outcome = compute_step(
                &last,
                &params,
                last.time + Duration::seconds(secs),
                supply,
                bonded,
            ).unwrap();
            prop_assert_eq!(outcome.last_block_info.inflation, start);
            last = outcome.last_block_info;
        }
    }

    #[test]
    fn shares_off_by_any_amount_are_rejected(
        params in valid_params(),
        delta in 1i64..=5_000,
        up in any::<bool>(),
    ) {
        let mut params = params;
        let first = &mut params.inflation_recipients[0];
        let nudge = Decimal::new(delta, 6);
        first.share = if up { first.share + nudge } else { first.share - nudge };
        let result = params.validate();
        let rejected = matches!(
            result,
            Err(ParamsError::SharesDoNotSumToOne(_)) | Err(ParamsError::ShareOutOfRange { .. })
        );
        prop_assert!(rejected);
    }
}
