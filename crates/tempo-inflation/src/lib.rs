// crates/tempo-inflation/src/lib.rs
//
// tempo-inflation: wall-clock driven token issuance for Tempo.
//
// Once per block the controller measures the time since the previous block,
// nudges the annual inflation rate toward the bonded-ratio target band,
// clamps it to the configured bounds, and mints the pro-rated issuance to a
// fixed list of recipients. All fractions are `rust_decimal::Decimal`; no
// floating point enters the state transition.
//
// State lives in the host's key-value store under two fixed keys:
//   - `inflation/params`          -> JSON `Params`
//   - `inflation/last_block_info` -> JSON `LastBlockInfo`

pub mod controller;
pub mod error;
pub mod genesis;
pub mod keeper;
pub mod math;
pub mod params;
pub mod state;

// Re-export key types for ergonomic access from downstream crates.
pub use controller::{compute_step, Allocation, StepOutcome};
pub use error::{InflationError, ParamsError};
pub use genesis::GenesisState;
pub use keeper::{InflationKeeper, LAST_BLOCK_INFO_KEY, PARAMS_KEY};
pub use math::YEAR_DURATION_SECS;
pub use params::{InflationRecipient, Params};
pub use state::LastBlockInfo;
