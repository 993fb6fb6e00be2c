// crates/tempo-inflation/src/genesis.rs
//
// Genesis import/export for the inflation module.

use serde::{Deserialize, Serialize};

use tempo_core::traits::KvStore;
use tempo_core::types::BlockTime;

use crate::error::InflationError;
use crate::keeper::InflationKeeper;
use crate::params::Params;
use crate::state::LastBlockInfo;

/// The module's slice of the chain genesis file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    /// Starting observation. When absent, genesis starts at
    /// `min_inflation` stamped with the genesis time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_block_info: Option<LastBlockInfo>,
}

impl GenesisState {
    pub fn new(params: Params, last_block_info: Option<LastBlockInfo>) -> Self {
        Self {
            params,
            last_block_info,
        }
    }

    pub fn validate(&self) -> Result<(), InflationError> {
        self.params.validate()?;
        if let Some(info) = &self.last_block_info {
            info.validate().map_err(InflationError::InvalidGenesis)?;
        }
        Ok(())
    }
}

impl<S: KvStore> InflationKeeper<S> {
    /// Write the genesis state into an empty store.
    pub fn init_genesis(
        &self,
        genesis: &GenesisState,
        genesis_time: BlockTime,
    ) -> Result<(), InflationError> {
        genesis.validate()?;
        if self.is_initialized()? {
            return Err(InflationError::InvalidGenesis(
                "inflation module is already initialized".to_string(),
            ));
        }

        let info = genesis
            .last_block_info
            .clone()
            .unwrap_or_else(|| LastBlockInfo::at_genesis(&genesis.params, genesis_time));

        self.set_params(&genesis.params)?;
        self.set_last_block_info(&info)?;

        tracing::info!(
            inflation = %info.inflation,
            time = %info.time,
            "Inflation module initialized from genesis"
        );
        Ok(())
    }

    /// Snapshot the current state as a genesis document.
    pub fn export_genesis(&self) -> Result<GenesisState, InflationError> {
        Ok(GenesisState {
            params: self.params()?,
            last_block_info: Some(self.last_block_info()?),
        })
    }
}
