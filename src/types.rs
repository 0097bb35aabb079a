//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used across the ledger and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Identity type used for oracles, holders, custody and collateral tokens, and the [`address!`]
/// macro for compile-time address literals.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
pub use alloy::primitives::{Address, ChainId, address};
/// 256-bit hash type used for question, condition and collection identifiers, and the [`b256!`]
/// macro for compile-time literals.
pub use alloy::primitives::{B256, b256};
/// 256-bit unsigned integer used for amounts, payout numerators and position IDs.
pub use alloy::primitives::U256;
