use thiserror::Error;

/// Host-level error types shared across the Tempo workspace.
#[derive(Debug, Error)]
pub enum TempoError {
    /// Storage layer error (RocksDB, staged writes).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid state transition.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The host ledger refused a read or a mint.
    #[error("Ledger error: {0}")]
    Ledger(String),
}

impl From<serde_json::Error> for TempoError {
    fn from(e: serde_json::Error) -> Self {
        TempoError::Serialization(e.to_string())
    }
}
