//! Types for CTF (Conditional Token Framework) operations.

mod event;
mod request;

pub use event::{
    ConditionPreparation, ConditionResolution, Event, PayoutRedemption, PositionSplit,
    PositionsMerge,
};
pub use request::{
    BINARY_OUTCOME_SLOT_COUNT, CollectionIdRequest, ConditionIdRequest, MergePositionsRequest,
    PositionIdRequest, PrepareConditionRequest, RedeemPositionsRequest, ReportPayoutsRequest,
    SplitPositionRequest,
};
