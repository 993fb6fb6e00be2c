// crates/tempo-inflation/src/error.rs
//
// Two error families:
//   - `ParamsError`: configuration rejected before it is stored. Never seen
//     by the per-block step.
//   - `InflationError`: everything the module can return, including the
//     invariant violations that must halt block processing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use tempo_core::error::TempoError;

/// A parameter set failed validation. One variant per rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: Decimal },

    #[error("min_inflation ({min}) exceeds max_inflation ({max})")]
    InflationBoundsInverted { min: Decimal, max: Decimal },

    #[error("min_bonded ({min}) exceeds max_bonded ({max})")]
    BondedBandInverted { min: Decimal, max: Decimal },

    #[error("inflation_change must be non-negative, got {0}")]
    NegativeInflationChange(Decimal),

    #[error("max_block_duration_secs must be positive")]
    ZeroMaxBlockDuration,

    #[error("inflation_recipients must not be empty")]
    NoRecipients,

    #[error("inflation recipient #{index} has an empty address")]
    EmptyRecipientAddress { index: usize },

    #[error("inflation recipient {0} is listed more than once")]
    DuplicateRecipient(String),

    #[error("share of recipient {address} must be within [0, 1], got {share}")]
    ShareOutOfRange { address: String, share: Decimal },

    #[error("inflation recipient shares must sum to exactly 1, got {0}")]
    SharesDoNotSumToOne(Decimal),
}

/// Errors returned by the inflation keeper and controller.
#[derive(Debug, Error)]
pub enum InflationError {
    /// Rejected parameter update (configuration error).
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ParamsError),

    /// Rejected genesis state (configuration error).
    #[error("Invalid genesis: {0}")]
    InvalidGenesis(String),

    /// Block time moved backwards relative to the stored observation.
    #[error("Block time {current} precedes last observed block time {last}")]
    ClockRegression {
        last: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// Bonded ratio is undefined with no supply.
    #[error("Total supply is zero; bonded ratio is undefined")]
    ZeroSupply,

    /// The adjusted inflation rate went negative.
    #[error("Computed inflation {0} is negative")]
    NegativeInflation(Decimal),

    /// The computed mint amount, or a recipient remainder, went negative.
    #[error("Computed mint amount {0} is negative")]
    NegativeMint(Decimal),

    /// A checked fixed-point operation overflowed.
    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),

    /// A singleton record the step needs has never been written.
    #[error("Missing module state: {0}")]
    MissingState(&'static str),

    /// Store or ledger failure reported by the host.
    #[error("Host error: {0}")]
    Host(#[from] TempoError),
}

impl InflationError {
    /// Whether this error is a broken invariant of the state machine.
    ///
    /// These must halt block processing; replaying the same block on the same
    /// state reproduces them on every honest node.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            InflationError::ClockRegression { .. }
                | InflationError::ZeroSupply
                | InflationError::NegativeInflation(_)
                | InflationError::NegativeMint(_)
                | InflationError::ArithmeticOverflow(_)
                | InflationError::MissingState(_)
        )
    }

    /// Whether this error is a rejected configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            InflationError::InvalidParams(_) | InflationError::InvalidGenesis(_)
        )
    }
}
