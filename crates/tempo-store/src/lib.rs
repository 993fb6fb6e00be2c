// crates/tempo-store/src/lib.rs
//
// tempo-store: Storage backends for Tempo.
//
// Provides a RocksDB-backed store for node deployments, an in-memory store
// for tests and offline simulation, and a staged overlay that buffers one
// block's writes so the host can commit or discard them as a unit.

pub mod memory;
pub mod rocks;
pub mod staged;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use staged::StagedStore;
