//! Condition lifecycle: preparation and resolution.
//!
//! A condition moves `Unprepared → Prepared → Resolved` and never back. The registry only
//! stores prepared conditions; anything absent is unprepared.

use std::collections::HashMap;

use alloy::primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use super::error::CtfError;
use super::ids;
use super::types::{
    ConditionPreparation, ConditionResolution, PrepareConditionRequest, ReportPayoutsRequest,
};
use crate::Result;
use crate::types::Address;

/// Fewest outcome slots a condition may have.
pub const MIN_OUTCOME_SLOTS: usize = 2;
/// Most outcome slots a condition may have.
pub const MAX_OUTCOME_SLOTS: usize = 256;

/// Lifecycle state of a condition.
#[non_exhaustive]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConditionStatus {
    Unprepared,
    Prepared,
    Resolved,
}

/// Descriptive record of a prepared condition.
///
/// Kept for display and lookups only. Reporting authority comes from the condition ID itself,
/// never from the `oracle` stored here.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub condition_id: B256,
    pub oracle: Address,
    pub question_id: B256,
    pub outcome_slot_count: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    condition: Condition,
    numerators: Vec<U256>,
    denominator: U256,
}

/// Stores every prepared condition with its payout vector.
#[derive(Debug, Clone, Default)]
pub struct ConditionRegistry {
    entries: HashMap<B256, Entry>,
}

/// Validates `count` against `MIN_OUTCOME_SLOTS..=MAX_OUTCOME_SLOTS`.
fn checked_slot_count(count: U256) -> std::result::Result<usize, CtfError> {
    usize::try_from(count)
        .ok()
        .filter(|n| (MIN_OUTCOME_SLOTS..=MAX_OUTCOME_SLOTS).contains(n))
        .ok_or(CtfError::InvalidSlotCount(count))
}

impl ConditionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares a condition with a zeroed payout vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The outcome slot count is outside `2..=256` ([`CtfError::InvalidSlotCount`])
    /// - The condition was already prepared ([`CtfError::AlreadyPrepared`])
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            oracle = %request.oracle,
            question_id = %request.question_id,
            outcome_slot_count = %request.outcome_slot_count
        ))
    )]
    pub fn prepare_condition(
        &mut self,
        request: &PrepareConditionRequest,
    ) -> Result<ConditionPreparation> {
        let outcome_slot_count = checked_slot_count(request.outcome_slot_count)?;
        let condition_id = ids::condition_id(
            request.oracle,
            request.question_id,
            request.outcome_slot_count,
        );

        if self.outcome_slot_count(&condition_id) != 0 {
            return Err(CtfError::AlreadyPrepared(condition_id).into());
        }

        self.entries.insert(
            condition_id,
            Entry {
                condition: Condition {
                    condition_id,
                    oracle: request.oracle,
                    question_id: request.question_id,
                    outcome_slot_count,
                },
                numerators: vec![U256::ZERO; outcome_slot_count],
                denominator: U256::ZERO,
            },
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(%condition_id, "condition prepared");

        Ok(ConditionPreparation {
            conditionId: condition_id,
            oracle: request.oracle,
            questionId: request.question_id,
            outcomeSlotCount: request.outcome_slot_count,
        })
    }

    /// Reports the payout numerators of a condition on behalf of `oracle`.
    ///
    /// `oracle` must be the authenticated identity of the caller: the condition is looked up by
    /// `condition_id(oracle, question_id, payouts.len())`, so only the oracle named at preparation
    /// can ever reach it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payout vector has fewer than two entries ([`CtfError::InvalidSlotCount`])
    /// - No condition with this oracle, question and length exists ([`CtfError::NotPrepared`]),
    ///   which covers every length past 256
    /// - Payouts were already reported ([`CtfError::AlreadyResolved`])
    /// - A stored numerator is already nonzero ([`CtfError::NumeratorAlreadySet`])
    /// - The numerators sum past `U256::MAX` ([`CtfError::Overflow`])
    /// - Every numerator is zero ([`CtfError::AllZeroPayout`])
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, oracle), fields(
            oracle = %oracle,
            question_id = %request.question_id,
            payouts_len = request.payouts.len()
        ))
    )]
    pub fn report_payouts(
        &mut self,
        oracle: Address,
        request: &ReportPayoutsRequest,
    ) -> Result<ConditionResolution> {
        let outcome_slot_count = U256::from(request.payouts.len());
        if request.payouts.len() < MIN_OUTCOME_SLOTS {
            return Err(CtfError::InvalidSlotCount(outcome_slot_count).into());
        }
        let condition_id = ids::condition_id(oracle, request.question_id, outcome_slot_count);

        let entry = self
            .entries
            .get_mut(&condition_id)
            .filter(|entry| entry.numerators.len() == request.payouts.len())
            .ok_or(CtfError::NotPrepared(condition_id))?;

        if !entry.denominator.is_zero() {
            return Err(CtfError::AlreadyResolved(condition_id).into());
        }

        let mut denominator = U256::ZERO;
        for (index, (stored, &payout)) in entry.numerators.iter().zip(&request.payouts).enumerate()
        {
            if !stored.is_zero() {
                return Err(CtfError::NumeratorAlreadySet {
                    condition_id,
                    index,
                }
                .into());
            }
            denominator = denominator
                .checked_add(payout)
                .ok_or(CtfError::Overflow)?;
        }

        if denominator.is_zero() {
            return Err(CtfError::AllZeroPayout(condition_id).into());
        }

        entry.numerators.clone_from(&request.payouts);
        entry.denominator = denominator;

        #[cfg(feature = "tracing")]
        tracing::debug!(%condition_id, %denominator, "condition resolved");

        Ok(ConditionResolution {
            conditionId: condition_id,
            oracle,
            questionId: request.question_id,
            outcomeSlotCount: outcome_slot_count,
            payoutNumerators: request.payouts.clone(),
        })
    }

    /// Number of outcome slots of the condition, 0 if unprepared.
    #[must_use]
    pub fn outcome_slot_count(&self, condition_id: &B256) -> usize {
        self.entries
            .get(condition_id)
            .map_or(0, |entry| entry.numerators.len())
    }

    /// Payout numerator of slot `index`, `None` if the condition is unprepared or the index is
    /// out of range.
    #[must_use]
    pub fn payout_numerator(&self, condition_id: &B256, index: usize) -> Option<U256> {
        self.payout_numerators(condition_id).get(index).copied()
    }

    /// Every payout numerator of the condition, empty if unprepared.
    #[must_use]
    pub fn payout_numerators(&self, condition_id: &B256) -> &[U256] {
        self.entries
            .get(condition_id)
            .map(|entry| entry.numerators.as_slice())
            .unwrap_or_default()
    }

    /// Payout denominator of the condition, 0 until resolved.
    #[must_use]
    pub fn payout_denominator(&self, condition_id: &B256) -> U256 {
        self.entries
            .get(condition_id)
            .map_or(U256::ZERO, |entry| entry.denominator)
    }

    #[must_use]
    pub fn status(&self, condition_id: &B256) -> ConditionStatus {
        match self.entries.get(condition_id) {
            None => ConditionStatus::Unprepared,
            Some(entry) if entry.denominator.is_zero() => ConditionStatus::Prepared,
            Some(_) => ConditionStatus::Resolved,
        }
    }

    #[must_use]
    pub fn condition(&self, condition_id: &B256) -> Option<&Condition> {
        self.entries.get(condition_id).map(|entry| &entry.condition)
    }

    /// Iterates over every prepared condition, in no particular order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.entries.values().map(|entry| &entry.condition)
    }
}
