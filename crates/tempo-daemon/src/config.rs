// crates/tempo-daemon/src/config.rs
//
// Runtime configuration for the Tempo daemon.
// Loaded from a TOML file or populated with defaults.

use std::fs;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use tempo_core::types::Amount;
use tempo_inflation::{GenesisState, YEAR_DURATION_SECS};

/// Largest accepted `block_time_secs`.
pub const MAX_BLOCK_TIME_SECS: u64 = YEAR_DURATION_SECS;

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Directory for the RocksDB state database.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Real time between produced blocks, in milliseconds.
    #[serde(default = "default_block_interval_ms")]
    pub block_interval_ms: u64,

    /// Seconds each block advances the chain timestamp by.
    #[serde(default = "default_block_time_secs")]
    pub block_time_secs: u64,

    /// Chain genesis time (RFC 3339 string). Defaults to the first start.
    #[serde(default)]
    pub genesis_time: Option<DateTime<Utc>>,

    /// Token supply seeded into the simulated ledger at genesis.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,

    /// Bonded amount seeded into the simulated ledger at genesis.
    #[serde(default = "default_initial_bonded")]
    pub initial_bonded: Amount,

    /// Change to the bonded amount applied before each block (may be negative).
    #[serde(default)]
    pub bonded_drift_per_block: i64,

    /// Stop after this many blocks. 0 runs until interrupted.
    #[serde(default)]
    pub max_blocks: u64,

    /// Inflation module genesis. Defaults to the module's default params.
    #[serde(default)]
    pub genesis: GenesisState,
}

fn default_data_dir() -> String {
    "~/.tempo/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_block_interval_ms() -> u64 {
    1_000
}

fn default_block_time_secs() -> u64 {
    6
}

fn default_initial_supply() -> Amount {
    1_000_000_000_000_000
}

fn default_initial_bonded() -> Amount {
    500_000_000_000_000
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            block_interval_ms: default_block_interval_ms(),
            block_time_secs: default_block_time_secs(),
            genesis_time: None,
            initial_supply: default_initial_supply(),
            initial_bonded: default_initial_bonded(),
            bonded_drift_per_block: 0,
            max_blocks: 0,
            genesis: GenesisState::default(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DaemonConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would stop the chain from producing blocks.
    pub fn validate(&self) -> Result<(), String> {
        if self.block_time_secs > MAX_BLOCK_TIME_SECS {
            return Err(format!(
                "block_time_secs {} exceeds the maximum of {}",
                self.block_time_secs, MAX_BLOCK_TIME_SECS
            ));
        }
        Ok(())
    }
}
