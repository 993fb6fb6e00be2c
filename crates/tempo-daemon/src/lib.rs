// crates/tempo-daemon/src/lib.rs
//
// Tempo daemon library: block production, the simulated host ledger, the
// TOML configuration, and node lifecycle state. The `tempo-daemon` binary in
// main.rs wires these together.

pub mod chain;
pub mod config;
pub mod ledger;
pub mod state;
