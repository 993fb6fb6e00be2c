// crates/tempo-core/src/lib.rs
//
// tempo-core: Core types, error type, and trait interfaces for Tempo.
//
// This is the leaf crate that every other crate in the workspace depends on.
// It names the two seams the issuance module has with its host: a key-value
// store for singleton state, and a ledger for supply reads and mint effects.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use tempo_core::KvStore;`
pub use error::TempoError;
pub use traits::{KvStore, Ledger};
pub use types::{Address, Amount, BlockTime};
