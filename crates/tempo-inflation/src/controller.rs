// crates/tempo-inflation/src/controller.rs
//
// The per-block inflation step, as a pure function of
// (LastBlockInfo, Params, block time, total supply, total bonded).
//
// Algorithm:
//   1. elapsed = block_time - last.time; negative is fatal
//   2. elapsed = min(elapsed, max_block_duration)
//   3. bonded_ratio = bonded / supply; zero supply is fatal
//   4. below the band: inflation += change * elapsed
//      above the band: inflation -= change * elapsed
//   5. inflation = clamp(inflation, min_inflation, max_inflation)
//   6. new observation = (inflation, block_time)
//   7. minted = floor(inflation * supply * elapsed / YEAR)
//   8. split minted across recipients; the last recipient takes the remainder
//
// Nothing here touches storage or the ledger. The keeper applies the outcome.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tempo_core::types::{Address, Amount, BlockTime};

use crate::error::{InflationError, ParamsError};
use crate::math::{elapsed_secs, to_amount, year_secs};
use crate::params::{InflationRecipient, Params};
use crate::state::LastBlockInfo;

/// Tokens minted to one recipient in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub address: Address,
    pub amount: Amount,
}

/// Everything one step produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Observation to persist for the next step.
    pub last_block_info: LastBlockInfo,
    /// Bonded ratio the adjustment was based on.
    pub bonded_ratio: Decimal,
    /// Seconds credited to this block, after the cap.
    pub elapsed_secs: Decimal,
    /// Whether the wall-clock gap exceeded the cap.
    pub elapsed_capped: bool,
    /// Total minted this step. Equals the sum of `allocations`.
    pub minted: Amount,
    /// Per-recipient amounts, in recipient order.
    pub allocations: Vec<Allocation>,
}

/// Seconds credited to this block: the gap since the last observation, capped
/// at `max_block_duration_secs`. Returns the credited value and whether the
/// cap applied.
pub fn credited_elapsed(
    last_time: BlockTime,
    block_time: BlockTime,
    params: &Params,
) -> Result<(Decimal, bool), InflationError> {
    let elapsed = elapsed_secs(last_time, block_time).ok_or(InflationError::ClockRegression {
        last: last_time,
        current: block_time,
    })?;
    let cap = Decimal::from(params.max_block_duration_secs);
    if elapsed > cap {
        Ok((cap, true))
    } else {
        Ok((elapsed, false))
    }
}

/// `total_bonded / total_supply`.
pub fn bonded_ratio(total_bonded: Amount, total_supply: Amount) -> Result<Decimal, InflationError> {
    if total_supply == 0 {
        return Err(InflationError::ZeroSupply);
    }
    Decimal::from(total_bonded)
        .checked_div(Decimal::from(total_supply))
        .ok_or(InflationError::ArithmeticOverflow("bonded ratio"))
}

/// Move `inflation` toward the band by `inflation_change * elapsed`.
///
/// Inside the band (inclusive) the rate is returned unchanged.
pub fn adjust_inflation(
    inflation: Decimal,
    bonded_ratio: Decimal,
    elapsed: Decimal,
    params: &Params,
) -> Result<Decimal, InflationError> {
    let step = params
        .inflation_change
        .checked_mul(elapsed)
        .ok_or(InflationError::ArithmeticOverflow("inflation change"))?;

    if bonded_ratio < params.min_bonded {
        inflation
            .checked_add(step)
            .ok_or(InflationError::ArithmeticOverflow("inflation increase"))
    } else if bonded_ratio > params.max_bonded {
        inflation
            .checked_sub(step)
            .ok_or(InflationError::ArithmeticOverflow("inflation decrease"))
    } else {
        Ok(inflation)
    }
}

/// Clamp to `[min_inflation, max_inflation]`.
pub fn clamp_inflation(inflation: Decimal, params: &Params) -> Decimal {
    inflation.max(params.min_inflation).min(params.max_inflation)
}

/// `floor(inflation * total_supply * elapsed / YEAR)`.
pub fn mint_amount(
    inflation: Decimal,
    total_supply: Amount,
    elapsed: Decimal,
) -> Result<Amount, InflationError> {
    let annual = inflation
        .checked_mul(Decimal::from(total_supply))
        .ok_or(InflationError::ArithmeticOverflow("annual issuance"))?;
    let scaled = annual
        .checked_mul(elapsed)
        .ok_or(InflationError::ArithmeticOverflow("pro-rated issuance"))?;
    let minted = scaled
        .checked_div(year_secs())
        .ok_or(InflationError::ArithmeticOverflow("pro-rated issuance"))?;

    if minted.is_sign_negative() && !minted.is_zero() {
        return Err(InflationError::NegativeMint(minted));
    }
    to_amount(minted).ok_or(InflationError::ArithmeticOverflow("mint amount"))
}

/// Split `minted` across `recipients` by share.
///
/// Every recipient gets `floor(minted * share)` except the last one with a
/// nonzero share, which gets whatever is left. The allocations always sum to
/// `minted`, and a zero-share recipient always gets nothing. Allocations
/// keep the order of `recipients`.
pub fn split_mint(
    minted: Amount,
    recipients: &[InflationRecipient],
) -> Result<Vec<Allocation>, InflationError> {
    if recipients.is_empty() {
        return Err(InflationError::InvalidParams(ParamsError::NoRecipients));
    }
    let designated = recipients
        .iter()
        .rposition(|recipient| !recipient.share.is_zero())
        .unwrap_or(recipients.len() - 1);

    let total = Decimal::from(minted);
    let mut amounts = Vec::with_capacity(recipients.len());
    let mut assigned: Amount = 0;

    for (index, recipient) in recipients.iter().enumerate() {
        if index == designated {
            amounts.push(0);
            continue;
        }
        let portion = total
            .checked_mul(recipient.share)
            .ok_or(InflationError::ArithmeticOverflow("recipient share"))?;
        let amount = to_amount(portion).ok_or(InflationError::NegativeMint(portion))?;
        assigned = assigned
            .checked_add(amount)
            .ok_or(InflationError::ArithmeticOverflow("allocation total"))?;
        amounts.push(amount);
    }

    amounts[designated] = minted.checked_sub(assigned).ok_or_else(|| {
        InflationError::NegativeMint(Decimal::from(minted) - Decimal::from(assigned))
    })?;

    Ok(recipients
        .iter()
        .zip(amounts)
        .map(|(recipient, amount)| Allocation {
            address: recipient.address.clone(),
            amount,
        })
        .collect())
}

/// Run one controller step.
pub fn compute_step(
    last: &LastBlockInfo,
    params: &Params,
    block_time: BlockTime,
    total_supply: Amount,
    total_bonded: Amount,
) -> Result<StepOutcome, InflationError> {
    let (elapsed, elapsed_capped) = credited_elapsed(last.time, block_time, params)?;
    let ratio = bonded_ratio(total_bonded, total_supply)?;

    let adjusted = adjust_inflation(last.inflation, ratio, elapsed, params)?;
    let inflation = clamp_inflation(adjusted, params);
    if inflation.is_sign_negative() && !inflation.is_zero() {
        return Err(InflationError::NegativeInflation(inflation));
    }

    let minted = mint_amount(inflation, total_supply, elapsed)?;
    let allocations = split_mint(minted, &params.inflation_recipients)?;

    Ok(StepOutcome {
        last_block_info: LastBlockInfo::new(inflation, block_time),
        bonded_ratio: ratio,
        elapsed_secs: elapsed,
        elapsed_capped,
        minted,
        allocations,
    })
}
