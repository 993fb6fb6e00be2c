// crates/tempo-inflation/src/params.rs
//
// Inflation parameters and their validation.
//
// Parameters are replaced wholesale by the host's governance path and checked
// here before they are stored. The per-block step trusts whatever passed
// `Params::validate`, so every rule the step relies on is enforced here.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;
use crate::math::{in_unit_interval, year_secs};

/// Address of the default (and usually only) inflation recipient.
pub const DEFAULT_RECIPIENT: &str = "fee_collector";

/// A recipient of newly minted tokens and its fixed share of each mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationRecipient {
    /// Account or module address on the host ledger.
    pub address: String,
    /// Fraction of every mint credited to `address`, in [0, 1].
    pub share: Decimal,
}

impl InflationRecipient {
    pub fn new(address: impl Into<String>, share: Decimal) -> Self {
        Self {
            address: address.into(),
            share,
        }
    }
}

/// Module parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Lower bound of the annual inflation rate.
    pub min_inflation: Decimal,
    /// Upper bound of the annual inflation rate.
    pub max_inflation: Decimal,
    /// Bottom of the bonded-ratio target band. Below it inflation rises.
    pub min_bonded: Decimal,
    /// Top of the bonded-ratio target band. Above it inflation falls.
    pub max_bonded: Decimal,
    /// Change applied to the inflation rate per second spent outside the band.
    pub inflation_change: Decimal,
    /// Most seconds a single block can be credited with.
    pub max_block_duration_secs: u64,
    /// Ordered recipients of each mint. The last one absorbs rounding remainders.
    pub inflation_recipients: Vec<InflationRecipient>,
}

impl Default for Params {
    /// 7%..20% inflation, 60%..70% bonded band, a full-range swing of 13 points
    /// per year, 60 second block cap, everything to the fee collector.
    fn default() -> Self {
        Self {
            min_inflation: Decimal::new(7, 2),
            max_inflation: Decimal::new(20, 2),
            min_bonded: Decimal::new(60, 2),
            max_bonded: Decimal::new(70, 2),
            inflation_change: Decimal::new(13, 2) / year_secs(),
            max_block_duration_secs: 60,
            inflation_recipients: vec![InflationRecipient::new(DEFAULT_RECIPIENT, Decimal::ONE)],
        }
    }
}

impl Params {
    /// Check every parameter rule. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, value) in [
            ("min_inflation", self.min_inflation),
            ("max_inflation", self.max_inflation),
            ("min_bonded", self.min_bonded),
            ("max_bonded", self.max_bonded),
        ] {
            if !in_unit_interval(value) {
                return Err(ParamsError::OutOfUnitRange { field, value });
            }
        }

        if self.min_inflation > self.max_inflation {
            return Err(ParamsError::InflationBoundsInverted {
                min: self.min_inflation,
                max: self.max_inflation,
            });
        }
        if self.min_bonded > self.max_bonded {
            return Err(ParamsError::BondedBandInverted {
                min: self.min_bonded,
                max: self.max_bonded,
            });
        }
        if self.inflation_change.is_sign_negative() && !self.inflation_change.is_zero() {
            return Err(ParamsError::NegativeInflationChange(self.inflation_change));
        }
        if self.max_block_duration_secs == 0 {
            return Err(ParamsError::ZeroMaxBlockDuration);
        }

        self.validate_recipients()
    }

    fn validate_recipients(&self) -> Result<(), ParamsError> {
        if self.inflation_recipients.is_empty() {
            return Err(ParamsError::NoRecipients);
        }

        let mut seen = HashSet::new();
        let mut total = Decimal::ZERO;
        for (index, recipient) in self.inflation_recipients.iter().enumerate() {
            if recipient.address.trim().is_empty() {
                return Err(ParamsError::EmptyRecipientAddress { index });
            }
            if !seen.insert(recipient.address.as_str()) {
                return Err(ParamsError::DuplicateRecipient(recipient.address.clone()));
            }
            if !in_unit_interval(recipient.share) {
                return Err(ParamsError::ShareOutOfRange {
                    address: recipient.address.clone(),
                    share: recipient.share,
                });
            }
            total = total
                .checked_add(recipient.share)
                .ok_or(ParamsError::SharesDoNotSumToOne(total))?;
        }

        // Exact decimal equality: 0.3 + 0.3 + 0.4 is 1, 1/3 * 3 is not.
        if total != Decimal::ONE {
            return Err(ParamsError::SharesDoNotSumToOne(total));
        }
        Ok(())
    }
}
