//! Inputs of the ledger operations and identifier queries.

use alloy::primitives::{B256, U256};
use bon::Builder;

use crate::ctf::ids::ROOT_COLLECTION_ID;
use crate::types::Address;

/// Number of outcome slots of a binary (YES/NO) condition.
pub const BINARY_OUTCOME_SLOT_COUNT: u64 = 2;

/// Inputs of [`ids::condition_id`](crate::ctf::ids::condition_id).
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct ConditionIdRequest {
    pub oracle: Address,
    pub question_id: B256,
    pub outcome_slot_count: U256,
}

/// Inputs of [`ids::collection_id`](crate::ctf::ids::collection_id).
///
/// Collections hold a single outcome slot; `outcome_index` selects it.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct CollectionIdRequest {
    /// Defaults to [`ROOT_COLLECTION_ID`], i.e. a collection directly on top of collateral
    #[builder(default = ROOT_COLLECTION_ID)]
    pub parent_collection_id: B256,
    pub condition_id: B256,
    /// Zero-based outcome slot, below 256
    pub outcome_index: usize,
}

/// Inputs of [`ids::position_id`](crate::ctf::ids::position_id).
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PositionIdRequest {
    pub collateral_token: Address,
    pub collection_id: B256,
}

/// Registers the condition `(oracle, question_id, outcome_slot_count)`.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PrepareConditionRequest {
    /// Sole identity able to report payouts
    pub oracle: Address,
    pub question_id: B256,
    /// `2..=256`
    pub outcome_slot_count: U256,
}

/// Payout vector reported by the caller for `question_id`.
///
/// The condition is looked up as `(caller, question_id, payouts.len())`, so only the oracle the
/// condition was prepared with can resolve it.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct ReportPayoutsRequest {
    pub question_id: B256,
    /// Numerator per outcome slot; their sum becomes the denominator
    pub payouts: Vec<U256>,
}

/// Moves `amount` of collateral into custody and mints `amount` of every outcome position.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct SplitPositionRequest {
    pub collateral_token: Address,
    pub condition_id: B256,
    pub amount: U256,
}

/// Burns `amount` of every outcome position and releases `amount` of collateral from custody.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct MergePositionsRequest {
    pub collateral_token: Address,
    pub condition_id: B256,
    /// Number of full sets
    pub amount: U256,
}

/// Burns every position the caller holds in a resolved condition and pays out its share.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct RedeemPositionsRequest {
    pub collateral_token: Address,
    pub condition_id: B256,
}

impl PrepareConditionRequest {
    /// YES/NO condition, slot 0 being YES.
    ///
    /// # Example
    ///
    /// ```
    /// # use ctf_ledger::ctf::types::PrepareConditionRequest;
    /// # use ctf_ledger::types::{B256, U256, address};
    /// let request = PrepareConditionRequest::for_binary_market(
    ///     address!("0x0000000000000000000000000000000000000001"),
    ///     B256::ZERO,
    /// );
    /// assert_eq!(request.outcome_slot_count, U256::from(2));
    /// ```
    #[must_use]
    pub fn for_binary_market(oracle: Address, question_id: B256) -> Self {
        Self {
            oracle,
            question_id,
            outcome_slot_count: U256::from(BINARY_OUTCOME_SLOT_COUNT),
        }
    }
}

impl ReportPayoutsRequest {
    /// Creates a report request for a binary market resolving fully to YES or fully to NO.
    #[must_use]
    pub fn for_binary_market(question_id: B256, yes: bool) -> Self {
        let (yes_payout, no_payout) = if yes { (1_u8, 0_u8) } else { (0_u8, 1_u8) };

        Self {
            question_id,
            payouts: vec![U256::from(yes_payout), U256::from(no_payout)],
        }
    }
}
