// crates/tempo-core/src/types.rs
//
// Primitive value types shared by the store, the issuance module and the host.

use chrono::{DateTime, Utc};

/// Token amount in base units (the smallest indivisible unit of the staking token).
pub type Amount = u64;

/// Recipient identifier on the host ledger (an account address or module name).
pub type Address = String;

/// Block timestamp as agreed by consensus.
pub type BlockTime = DateTime<Utc>;
