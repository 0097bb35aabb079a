//! CTF-specific error types.

use std::error::Error as StdError;
use std::fmt;

use alloy::primitives::{Address, B256, U256};

use crate::error::Kind;

/// CTF-specific errors.
///
/// Every variant aborts the operation that raised it in its entirety. Use
/// [`crate::error::Error::ctf`] to recover the exact failure from a returned error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtfError {
    /// Outcome slot count outside `2..=256`
    InvalidSlotCount(U256),
    /// Condition was already prepared
    AlreadyPrepared(B256),
    /// Condition was never prepared (or the reported payout length does not match)
    NotPrepared(B256),
    /// Condition already has payouts reported
    AlreadyResolved(B256),
    /// Condition has no payouts reported yet
    NotResolved(B256),
    /// A payout numerator for this slot is already stored
    NumeratorAlreadySet { condition_id: B256, index: usize },
    /// Every reported payout numerator is zero
    AllZeroPayout(B256),
    /// Collateral balance of `owner` is short of `required`
    InsufficientFunds {
        token: Address,
        owner: Address,
        balance: U256,
        required: U256,
    },
    /// Collateral allowance granted by `owner` to `spender` is short of `required`
    InsufficientAllowance {
        token: Address,
        owner: Address,
        spender: Address,
        allowance: U256,
        required: U256,
    },
    /// Position balance of `owner` is short of `required`
    InsufficientBalance {
        owner: Address,
        position_id: U256,
        balance: U256,
        required: U256,
    },
    /// The collateral asset reported an unsuccessful transfer
    CollateralTransferFailed(Address),
    /// Batch ids and amounts have different lengths
    LengthMismatch { ids: usize, amounts: usize },
    /// 256-bit arithmetic overflow
    Overflow,
}

impl CtfError {
    /// The coarse [`Kind`] this error surfaces as.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::InvalidSlotCount(_) | Self::LengthMismatch { .. } => Kind::Validation,
            Self::AlreadyPrepared(_)
            | Self::NotPrepared(_)
            | Self::AlreadyResolved(_)
            | Self::NotResolved(_)
            | Self::NumeratorAlreadySet { .. }
            | Self::AllZeroPayout(_) => Kind::Condition,
            Self::InsufficientFunds { .. }
            | Self::InsufficientAllowance { .. }
            | Self::InsufficientBalance { .. } => Kind::Balance,
            Self::CollateralTransferFailed(_) | Self::Overflow => Kind::Internal,
        }
    }
}

impl fmt::Display for CtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlotCount(count) => {
                write!(f, "outcome slot count {count} is outside 2..=256")
            }
            Self::AlreadyPrepared(id) => write!(f, "condition {id} already prepared"),
            Self::NotPrepared(id) => write!(f, "condition {id} not prepared"),
            Self::AlreadyResolved(id) => write!(f, "condition {id} already resolved"),
            Self::NotResolved(id) => write!(f, "condition {id} not resolved"),
            Self::NumeratorAlreadySet {
                condition_id,
                index,
            } => write!(
                f,
                "payout numerator {index} of condition {condition_id} already set"
            ),
            Self::AllZeroPayout(id) => write!(f, "payout for condition {id} is all zeroes"),
            Self::InsufficientFunds {
                token,
                owner,
                balance,
                required,
            } => write!(
                f,
                "insufficient funds of {token} for {owner}: balance {balance}, required {required}"
            ),
            Self::InsufficientAllowance {
                token,
                owner,
                spender,
                allowance,
                required,
            } => write!(
                f,
                "insufficient allowance of {token} from {owner} to {spender}: allowance {allowance}, required {required}"
            ),
            Self::InsufficientBalance {
                owner,
                position_id,
                balance,
                required,
            } => write!(
                f,
                "insufficient balance of position {position_id} for {owner}: balance {balance}, required {required}"
            ),
            Self::CollateralTransferFailed(token) => {
                write!(f, "could not transfer collateral token {token}")
            }
            Self::LengthMismatch { ids, amounts } => {
                write!(f, "{ids} ids supplied with {amounts} amounts")
            }
            Self::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl StdError for CtfError {}

impl From<CtfError> for crate::error::Error {
    fn from(err: CtfError) -> Self {
        crate::error::Error::with_source(err.kind(), err)
    }
}
