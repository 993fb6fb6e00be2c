// crates/tempo-inflation/src/math.rs
//
// Fixed-point helpers shared by the controller and the parameter checks.
//
// Time is measured in seconds as a `Decimal` with nanosecond resolution.
// Token amounts leave the decimal domain by truncation toward zero, which is
// the floor for the non-negative values the controller produces.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use tempo_core::types::Amount;

/// Length of the year the annual rate is pro-rated against: 365 days.
pub const YEAR_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// `YEAR_DURATION_SECS` as a decimal.
pub fn year_secs() -> Decimal {
    Decimal::from(YEAR_DURATION_SECS)
}

/// Whether `value` lies in the closed unit interval [0, 1].
pub fn in_unit_interval(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Seconds from `from` to `to`, exact to the nanosecond.
///
/// Returns `None` when `to` precedes `from`.
pub fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Decimal> {
    let delta = to.signed_duration_since(from);
    if delta < chrono::TimeDelta::zero() {
        return None;
    }
    let whole = Decimal::from(delta.num_seconds());
    let nanos = Decimal::new(i64::from(delta.subsec_nanos()), 9);
    Some(whole + nanos)
}

/// Truncate a non-negative decimal to a whole token amount.
///
/// Returns `None` for negative values or values beyond `Amount::MAX`.
pub fn to_amount(value: Decimal) -> Option<Amount> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    value.trunc().to_u64()
}
