//! Event records emitted by CTF operations.
//!
//! Events are declared with Solidity ABI signatures so that each record has a canonical
//! `topic0` and can be encoded to EVM log data.

#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "Alloy sol! macro generates code that triggers these lints"
)]

use alloy::primitives::{B256, LogData};
use alloy::sol;
use alloy::sol_types::SolEvent as _;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    /// Emitted once when a condition is prepared.
    event ConditionPreparation(
        bytes32 indexed conditionId,
        address indexed oracle,
        bytes32 indexed questionId,
        uint256 outcomeSlotCount
    );

    #[derive(Debug, PartialEq, Eq)]
    /// Emitted once when the oracle reports the payouts of a condition.
    event ConditionResolution(
        bytes32 indexed conditionId,
        address indexed oracle,
        bytes32 indexed questionId,
        uint256 outcomeSlotCount,
        uint256[] payoutNumerators
    );

    #[derive(Debug, PartialEq, Eq)]
    /// Emitted when collateral is split into one position per outcome slot.
    event PositionSplit(
        address indexed stakeholder,
        address collateralToken,
        bytes32 indexed conditionId,
        uint256 amount
    );

    #[derive(Debug, PartialEq, Eq)]
    /// Emitted when a full set of outcome positions is merged back into collateral.
    event PositionsMerge(
        address indexed stakeholder,
        address collateralToken,
        bytes32 indexed conditionId,
        uint256 amount
    );

    #[derive(Debug, PartialEq, Eq)]
    /// Emitted on every redemption, including those paying out nothing.
    event PayoutRedemption(
        address indexed redeemer,
        address indexed collateralToken,
        bytes32 indexed conditionId,
        uint256 payout
    );
}

/// Any record appended to the engine's event log.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Event {
    ConditionPreparation(ConditionPreparation),
    ConditionResolution(ConditionResolution),
    PositionSplit(PositionSplit),
    PositionsMerge(PositionsMerge),
    PayoutRedemption(PayoutRedemption),
}

impl Event {
    /// The condition this record refers to.
    #[must_use]
    pub fn condition_id(&self) -> B256 {
        match self {
            Self::ConditionPreparation(e) => e.conditionId,
            Self::ConditionResolution(e) => e.conditionId,
            Self::PositionSplit(e) => e.conditionId,
            Self::PositionsMerge(e) => e.conditionId,
            Self::PayoutRedemption(e) => e.conditionId,
        }
    }

    /// The event signature hash, i.e. `topic0` of the encoded log.
    #[must_use]
    pub fn signature_hash(&self) -> B256 {
        match self {
            Self::ConditionPreparation(_) => ConditionPreparation::SIGNATURE_HASH,
            Self::ConditionResolution(_) => ConditionResolution::SIGNATURE_HASH,
            Self::PositionSplit(_) => PositionSplit::SIGNATURE_HASH,
            Self::PositionsMerge(_) => PositionsMerge::SIGNATURE_HASH,
            Self::PayoutRedemption(_) => PayoutRedemption::SIGNATURE_HASH,
        }
    }

    /// Encodes the record as EVM log topics and data.
    #[must_use]
    pub fn log_data(&self) -> LogData {
        match self {
            Self::ConditionPreparation(e) => e.encode_log_data(),
            Self::ConditionResolution(e) => e.encode_log_data(),
            Self::PositionSplit(e) => e.encode_log_data(),
            Self::PositionsMerge(e) => e.encode_log_data(),
            Self::PayoutRedemption(e) => e.encode_log_data(),
        }
    }
}

impl From<ConditionPreparation> for Event {
    fn from(e: ConditionPreparation) -> Self {
        Self::ConditionPreparation(e)
    }
}

impl From<ConditionResolution> for Event {
    fn from(e: ConditionResolution) -> Self {
        Self::ConditionResolution(e)
    }
}

impl From<PositionSplit> for Event {
    fn from(e: PositionSplit) -> Self {
        Self::PositionSplit(e)
    }
}

impl From<PositionsMerge> for Event {
    fn from(e: PositionsMerge) -> Self {
        Self::PositionsMerge(e)
    }
}

impl From<PayoutRedemption> for Event {
    fn from(e: PayoutRedemption) -> Self {
        Self::PayoutRedemption(e)
    }
}
