// crates/tempo-cli/src/commands/mod.rs
//
// Command module declarations for the Tempo CLI.

pub mod query;
pub mod simulate;
pub mod validate;
