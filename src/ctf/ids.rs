//! Deterministic identifier derivation.
//!
//! Condition, collection and position identifiers are never stored; they are recomputed from
//! their inputs on demand. Every function here hashes the same tightly packed byte layout as
//! Solidity's `abi.encodePacked` with keccak-256, so identifiers match those of the deployed
//! Gnosis Conditional Tokens contract bit for bit.

use alloy::primitives::{Address, B256, U256, keccak256};

/// The root collection, i.e. positions backed directly by collateral.
pub const ROOT_COLLECTION_ID: B256 = B256::ZERO;

/// Computes a condition ID.
///
/// `keccak256(oracle ‖ question_id ‖ outcome_slot_count)` with the address as 20 bytes and the
/// slot count as a 32-byte big-endian word.
#[must_use]
pub fn condition_id(oracle: Address, question_id: B256, outcome_slot_count: U256) -> B256 {
    let mut packed = [0_u8; 20 + 32 + 32];
    packed[..20].copy_from_slice(oracle.as_slice());
    packed[20..52].copy_from_slice(question_id.as_slice());
    packed[52..].copy_from_slice(&outcome_slot_count.to_be_bytes::<32>());

    keccak256(packed)
}

/// The singleton index set (bitmask) selecting only `outcome_index`.
///
/// `outcome_index` must be below 256; callers validate it against the condition's slot count.
#[must_use]
pub fn index_set(outcome_index: usize) -> U256 {
    U256::from(1) << outcome_index
}

/// Computes a collection ID.
///
/// The hash of `condition_id ‖ index_set(outcome_index)` is added to `parent_collection_id`
/// modulo 2^256.
#[must_use]
pub fn collection_id(
    parent_collection_id: B256,
    condition_id: B256,
    outcome_index: usize,
) -> B256 {
    let mut packed = [0_u8; 32 + 32];
    packed[..32].copy_from_slice(condition_id.as_slice());
    packed[32..].copy_from_slice(&index_set(outcome_index).to_be_bytes::<32>());

    let child = U256::from_be_bytes(keccak256(packed).0);
    let parent = U256::from_be_bytes(parent_collection_id.0);

    B256::from(parent.wrapping_add(child).to_be_bytes::<32>())
}

/// Computes a position ID, the token key in the position ledger.
///
/// `keccak256(collateral_token ‖ collection_id)` read as a big-endian integer.
#[must_use]
pub fn position_id(collateral_token: Address, collection_id: B256) -> U256 {
    let mut packed = [0_u8; 20 + 32];
    packed[..20].copy_from_slice(collateral_token.as_slice());
    packed[20..].copy_from_slice(collection_id.as_slice());

    U256::from_be_bytes(keccak256(packed).0)
}

/// Position IDs of every outcome slot of `condition_id` at the root collection, ordered by
/// outcome index.
#[must_use]
pub fn position_ids(
    collateral_token: Address,
    condition_id: B256,
    outcome_slot_count: usize,
) -> Vec<U256> {
    (0..outcome_slot_count)
        .map(|index| {
            position_id(
                collateral_token,
                collection_id(ROOT_COLLECTION_ID, condition_id, index),
            )
        })
        .collect()
}
