// crates/tempo-inflation/src/state.rs
//
// The controller's single observation: the rate in effect after the last
// step and the block time it was computed at. Overwritten every block; no
// history is kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tempo_core::types::BlockTime;

use crate::math::in_unit_interval;
use crate::params::Params;

/// Last observed inflation rate and its block time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastBlockInfo {
    /// Annual inflation rate in effect as of `time`, in [0, 1].
    pub inflation: Decimal,
    /// Block time of the step that produced `inflation`.
    pub time: BlockTime,
}

impl LastBlockInfo {
    pub fn new(inflation: Decimal, time: BlockTime) -> Self {
        Self { inflation, time }
    }

    /// Observation used when genesis does not supply one: the floor rate,
    /// stamped with the genesis time.
    pub fn at_genesis(params: &Params, genesis_time: BlockTime) -> Self {
        Self {
            inflation: params.min_inflation,
            time: genesis_time,
        }
    }

    /// Reject an observation whose rate is outside [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        if !in_unit_interval(self.inflation) {
            return Err(format!(
                "last block inflation must be within [0, 1], got {}",
                self.inflation
            ));
        }
        Ok(())
    }
}
