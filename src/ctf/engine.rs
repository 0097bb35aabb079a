//! Position accounting: split, merge and redeem.
//!
//! [`ConditionalTokens`] owns the condition registry and the two collaborators (collateral and
//! position ledger). Every mutating operation runs inside a transactional boundary: the
//! state is staged, the operation runs against the staged copy, and the copy replaces the live
//! state only if the operation succeeded. A failed operation leaves registry, collateral, ledger
//! and event log exactly as they were.
//!
//! # Example
//!
//! ```
//! use ctf_ledger::ctf::{Config, ConditionalTokens};
//! use ctf_ledger::ctf::types::{
//!     PrepareConditionRequest, RedeemPositionsRequest, ReportPayoutsRequest,
//!     SplitPositionRequest,
//! };
//! use ctf_ledger::types::{B256, U256, address};
//!
//! # fn main() -> ctf_ledger::Result<()> {
//! let usdc = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
//! let oracle = address!("0x00000000000000000000000000000000000000a1");
//! let holder = address!("0x00000000000000000000000000000000000000b2");
//! let custody = address!("0x00000000000000000000000000000000000000c3");
//!
//! let mut ctf = ConditionalTokens::new(Config::builder().custody(custody).build());
//! ctf.collateral_mut().mint(usdc, holder, U256::from(100))?;
//! ctf.collateral_mut().approve(usdc, holder, custody, U256::from(100));
//!
//! let condition_id = ctf
//!     .prepare_condition(&PrepareConditionRequest::for_binary_market(oracle, B256::ZERO))?
//!     .conditionId;
//! ctf.split_position(holder, &SplitPositionRequest::builder()
//!     .collateral_token(usdc)
//!     .condition_id(condition_id)
//!     .amount(U256::from(100))
//!     .build())?;
//! ctf.report_payouts(oracle, &ReportPayoutsRequest::for_binary_market(B256::ZERO, true))?;
//!
//! let redemption = ctf.redeem_positions(holder, &RedeemPositionsRequest::builder()
//!     .collateral_token(usdc)
//!     .condition_id(condition_id)
//!     .build())?;
//! assert_eq!(redemption.payout, U256::from(100));
//! # Ok(())
//! # }
//! ```

use alloy::primitives::{B256, ChainId, U256};
use bon::Builder;

use super::collateral::{CollateralAsset, Erc20Collateral};
use super::error::CtfError;
use super::ids;
use super::ledger::{Erc1155Ledger, TokenLedger};
use super::registry::{Condition, ConditionRegistry, ConditionStatus};
use super::types::{
    CollectionIdRequest, ConditionIdRequest, ConditionPreparation, ConditionResolution, Event,
    MergePositionsRequest, PayoutRedemption, PositionIdRequest, PositionSplit, PositionsMerge,
    PrepareConditionRequest, RedeemPositionsRequest, ReportPayoutsRequest, SplitPositionRequest,
};
use crate::error::Error;
use crate::types::Address;
use crate::{Result, contract_config};

/// Configuration for [`ConditionalTokens`]
#[derive(Clone, Debug, Builder)]
pub struct Config {
    /// Identity that holds collateral in custody on behalf of position holders. Holders approve
    /// this identity to pull collateral on split.
    custody: Address,
}

impl Config {
    /// Configuration using the deployed conditional tokens identity of `chain_id` as custody.
    ///
    /// # Errors
    ///
    /// Returns an error if no contract configuration exists for `chain_id`.
    pub fn for_chain(chain_id: ChainId) -> Result<Self> {
        let config =
            contract_config(chain_id).ok_or_else(|| Error::missing_contract_config(chain_id))?;

        Ok(Self {
            custody: config.conditional_tokens,
        })
    }

    #[must_use]
    pub const fn custody(&self) -> Address {
        self.custody
    }
}

#[derive(Debug, Clone)]
struct State<C, L> {
    registry: ConditionRegistry,
    collateral: C,
    ledger: L,
}

/// Ledger engine for conditional outcome positions.
#[derive(Debug, Clone)]
pub struct ConditionalTokens<C = Erc20Collateral, L = Erc1155Ledger> {
    config: Config,
    state: State<C, L>,
    events: Vec<Event>,
}

impl ConditionalTokens {
    /// Creates an engine backed by in-memory collateral and position ledgers.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_collaborators(config, Erc20Collateral::new(), Erc1155Ledger::new())
    }
}

fn ensure_transferred(transferred: bool, token: Address) -> Result<()> {
    if transferred {
        Ok(())
    } else {
        Err(CtfError::CollateralTransferFailed(token).into())
    }
}

impl<C, L> ConditionalTokens<C, L>
where
    C: CollateralAsset + Clone,
    L: TokenLedger + Clone,
{
    #[must_use]
    pub fn with_collaborators(config: Config, collateral: C, ledger: L) -> Self {
        Self {
            config,
            state: State {
                registry: ConditionRegistry::new(),
                collateral,
                ledger,
            },
            events: Vec::new(),
        }
    }

    /// Runs `operation` against a staged copy of the state and commits the copy, together with
    /// the emitted record, only if the operation succeeds.
    ///
    /// Staging clones the registry and both collaborators, so every call costs time linear in
    /// the total number of conditions, collateral accounts and position holdings.
    fn transact<T, F>(&mut self, operation: F) -> Result<T>
    where
        T: Clone + Into<Event>,
        F: FnOnce(&mut State<C, L>) -> Result<T>,
    {
        let mut staged = self.state.clone();

        let outcome = operation(&mut staged);
        #[cfg(feature = "tracing")]
        let outcome = outcome.inspect_err(|e| {
            tracing::warn!(error = %e, "operation rejected, state rolled back");
        });
        let record = outcome?;

        self.state = staged;
        self.events.push(record.clone().into());
        Ok(record)
    }

    /// Prepares a condition.
    ///
    /// # Errors
    ///
    /// See [`ConditionRegistry::prepare_condition`].
    pub fn prepare_condition(
        &mut self,
        request: &PrepareConditionRequest,
    ) -> Result<ConditionPreparation> {
        self.transact(|state| state.registry.prepare_condition(request))
    }

    /// Reports payouts for a condition; `caller` is the reporting oracle.
    ///
    /// # Errors
    ///
    /// See [`ConditionRegistry::report_payouts`].
    pub fn report_payouts(
        &mut self,
        caller: Address,
        request: &ReportPayoutsRequest,
    ) -> Result<ConditionResolution> {
        self.transact(|state| state.registry.report_payouts(caller, request))
    }

    /// Splits collateral into one position per outcome slot.
    ///
    /// Pulls `amount` of collateral from `caller` into custody and mints `amount` of every
    /// outcome position of the condition to `caller`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The condition hasn't been prepared
    /// - `caller` lacks the collateral balance or the allowance granted to custody
    /// - The collateral declines the transfer
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, caller), fields(
            caller = %caller,
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            amount = %request.amount
        ))
    )]
    pub fn split_position(
        &mut self,
        caller: Address,
        request: &SplitPositionRequest,
    ) -> Result<PositionSplit> {
        let custody = self.config.custody;

        self.transact(|state| {
            let outcome_slot_count = state.registry.outcome_slot_count(&request.condition_id);
            if outcome_slot_count == 0 {
                return Err(CtfError::NotPrepared(request.condition_id).into());
            }

            let transferred = state.collateral.transfer_from(
                request.collateral_token,
                custody,
                caller,
                custody,
                request.amount,
            )?;
            ensure_transferred(transferred, request.collateral_token)?;

            let position_ids = ids::position_ids(
                request.collateral_token,
                request.condition_id,
                outcome_slot_count,
            );
            let amounts = vec![request.amount; outcome_slot_count];
            state.ledger.mint_batch(caller, &position_ids, &amounts)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(positions = outcome_slot_count, "positions minted");

            Ok(PositionSplit {
                stakeholder: caller,
                collateralToken: request.collateral_token,
                conditionId: request.condition_id,
                amount: request.amount,
            })
        })
    }

    /// Merges a full set of outcome positions back into collateral.
    ///
    /// Burns `amount` of every outcome position of the condition from `caller` and returns
    /// `amount` of collateral from custody.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The condition hasn't been prepared
    /// - `caller` holds less than `amount` of any outcome position
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, caller), fields(
            caller = %caller,
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            amount = %request.amount
        ))
    )]
    pub fn merge_positions(
        &mut self,
        caller: Address,
        request: &MergePositionsRequest,
    ) -> Result<PositionsMerge> {
        let custody = self.config.custody;

        self.transact(|state| {
            let outcome_slot_count = state.registry.outcome_slot_count(&request.condition_id);
            if outcome_slot_count == 0 {
                return Err(CtfError::NotPrepared(request.condition_id).into());
            }

            let position_ids = ids::position_ids(
                request.collateral_token,
                request.condition_id,
                outcome_slot_count,
            );
            let amounts = vec![request.amount; outcome_slot_count];
            state.ledger.burn_batch(caller, &position_ids, &amounts)?;

            let transferred = state.collateral.transfer(
                request.collateral_token,
                custody,
                caller,
                request.amount,
            )?;
            ensure_transferred(transferred, request.collateral_token)?;

            Ok(PositionsMerge {
                stakeholder: caller,
                collateralToken: request.collateral_token,
                conditionId: request.condition_id,
                amount: request.amount,
            })
        })
    }

    /// Redeems every outcome position `caller` holds in a resolved condition.
    ///
    /// Each slot pays `balance * numerator / denominator`, rounded down; the remainder is
    /// forfeited. Every held position is burned, and the record is emitted even when the
    /// payout is zero.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The condition hasn't been resolved
    /// - `balance * numerator` overflows
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, caller), fields(
            caller = %caller,
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            payout
        ))
    )]
    pub fn redeem_positions(
        &mut self,
        caller: Address,
        request: &RedeemPositionsRequest,
    ) -> Result<PayoutRedemption> {
        let custody = self.config.custody;

        self.transact(|state| {
            let denominator = state.registry.payout_denominator(&request.condition_id);
            if denominator.is_zero() {
                return Err(CtfError::NotResolved(request.condition_id).into());
            }

            let numerators = state.registry.payout_numerators(&request.condition_id);
            let position_ids = ids::position_ids(
                request.collateral_token,
                request.condition_id,
                numerators.len(),
            );

            let mut payout = U256::ZERO;
            let mut burned_ids = Vec::with_capacity(position_ids.len());
            let mut burned_amounts = Vec::with_capacity(position_ids.len());
            for (position_id, numerator) in position_ids.into_iter().zip(numerators) {
                let balance = state.ledger.balance_of(caller, position_id);
                if balance.is_zero() {
                    continue;
                }

                let share = balance
                    .checked_mul(*numerator)
                    .ok_or(CtfError::Overflow)?
                    / denominator;
                payout = payout.checked_add(share).ok_or(CtfError::Overflow)?;
                burned_ids.push(position_id);
                burned_amounts.push(balance);
            }

            state
                .ledger
                .burn_batch(caller, &burned_ids, &burned_amounts)?;

            if !payout.is_zero() {
                let transferred =
                    state
                        .collateral
                        .transfer(request.collateral_token, custody, caller, payout)?;
                ensure_transferred(transferred, request.collateral_token)?;
            }

            #[cfg(feature = "tracing")]
            tracing::Span::current().record("payout", tracing::field::display(payout));

            Ok(PayoutRedemption {
                redeemer: caller,
                collateralToken: request.collateral_token,
                conditionId: request.condition_id,
                payout,
            })
        })
    }

    /// Calculates a condition ID.
    #[must_use]
    pub fn condition_id(&self, request: &ConditionIdRequest) -> B256 {
        ids::condition_id(
            request.oracle,
            request.question_id,
            request.outcome_slot_count,
        )
    }

    /// Calculates a collection ID.
    ///
    /// # Errors
    ///
    /// Returns an error if `outcome_index` is not below 256.
    pub fn collection_id(&self, request: &CollectionIdRequest) -> Result<B256> {
        if request.outcome_index >= super::registry::MAX_OUTCOME_SLOTS {
            return Err(Error::validation(
                "outcome_index",
                format!(
                    "{} must be below {}",
                    request.outcome_index,
                    super::registry::MAX_OUTCOME_SLOTS
                ),
            ));
        }

        Ok(ids::collection_id(
            request.parent_collection_id,
            request.condition_id,
            request.outcome_index,
        ))
    }

    /// Calculates a position ID.
    #[must_use]
    pub fn position_id(&self, request: &PositionIdRequest) -> U256 {
        ids::position_id(request.collateral_token, request.collection_id)
    }

    /// Position IDs of every outcome slot of a prepared condition, empty if unprepared.
    #[must_use]
    pub fn position_ids(&self, collateral_token: Address, condition_id: &B256) -> Vec<U256> {
        ids::position_ids(
            collateral_token,
            *condition_id,
            self.outcome_slot_count(condition_id),
        )
    }

    #[must_use]
    pub fn outcome_slot_count(&self, condition_id: &B256) -> usize {
        self.state.registry.outcome_slot_count(condition_id)
    }

    #[must_use]
    pub fn payout_numerator(&self, condition_id: &B256, index: usize) -> Option<U256> {
        self.state.registry.payout_numerator(condition_id, index)
    }

    #[must_use]
    pub fn payout_denominator(&self, condition_id: &B256) -> U256 {
        self.state.registry.payout_denominator(condition_id)
    }

    #[must_use]
    pub fn status(&self, condition_id: &B256) -> ConditionStatus {
        self.state.registry.status(condition_id)
    }

    #[must_use]
    pub fn condition(&self, condition_id: &B256) -> Option<&Condition> {
        self.state.registry.condition(condition_id)
    }

    /// Position balance of `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address, position_id: U256) -> U256 {
        self.state.ledger.balance_of(owner, position_id)
    }

    /// Collateral of `token` currently held in custody.
    #[must_use]
    pub fn custody_balance(&self, token: Address) -> U256 {
        self.state.collateral.balance_of(token, self.config.custody)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ConditionRegistry {
        &self.state.registry
    }

    #[must_use]
    pub const fn collateral(&self) -> &C {
        &self.state.collateral
    }

    /// Direct access to the collateral, e.g. for funding holders and granting allowances.
    pub const fn collateral_mut(&mut self) -> &mut C {
        &mut self.state.collateral
    }

    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.state.ledger
    }

    /// Direct access to the position ledger, e.g. for holder-to-holder transfers.
    pub const fn ledger_mut(&mut self) -> &mut L {
        &mut self.state.ledger
    }

    /// Every record emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::error::Kind;

    const USDC: Address = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    const ORACLE: Address = address!("0x00000000000000000000000000000000000000a1");
    const HOLDER: Address = address!("0x00000000000000000000000000000000000000b2");
    const CUSTODY: Address = address!("0x00000000000000000000000000000000000000c3");
    const QUESTION: B256 = B256::with_last_byte(0x51);

    /// Collateral that accepts every call but reports each transfer as declined.
    #[derive(Debug, Clone, Default)]
    struct DecliningCollateral(Erc20Collateral);

    impl CollateralAsset for DecliningCollateral {
        fn transfer_from(
            &mut self,
            token: Address,
            spender: Address,
            from: Address,
            to: Address,
            amount: U256,
        ) -> Result<bool> {
            self.0.transfer_from(token, spender, from, to, amount)?;
            Ok(false)
        }

        fn transfer(
            &mut self,
            token: Address,
            from: Address,
            to: Address,
            amount: U256,
        ) -> Result<bool> {
            self.0.transfer(token, from, to, amount)?;
            Ok(false)
        }

        fn balance_of(&self, token: Address, owner: Address) -> U256 {
            self.0.balance_of(token, owner)
        }
    }

    /// Ledger whose mints always fail, after the collateral has already moved.
    #[derive(Debug, Clone, Default)]
    struct FullLedger(Erc1155Ledger);

    impl TokenLedger for FullLedger {
        fn mint_batch(&mut self, _owner: Address, _ids: &[U256], _amounts: &[U256]) -> Result<()> {
            Err(CtfError::Overflow.into())
        }

        fn burn_batch(&mut self, owner: Address, ids: &[U256], amounts: &[U256]) -> Result<()> {
            self.0.burn_batch(owner, ids, amounts)
        }

        fn balance_of(&self, owner: Address, id: U256) -> U256 {
            self.0.balance_of(owner, id)
        }
    }

    fn config() -> Config {
        Config::builder().custody(CUSTODY).build()
    }

    fn prepared<C, L>(mut ctf: ConditionalTokens<C, L>) -> (ConditionalTokens<C, L>, B256)
    where
        C: CollateralAsset + Clone,
        L: TokenLedger + Clone,
    {
        let condition_id = ctf
            .prepare_condition(&PrepareConditionRequest::for_binary_market(ORACLE, QUESTION))
            .expect("prepare should succeed")
            .conditionId;
        (ctf, condition_id)
    }

    fn split(condition_id: B256, amount: u64) -> SplitPositionRequest {
        SplitPositionRequest::builder()
            .collateral_token(USDC)
            .condition_id(condition_id)
            .amount(U256::from(amount))
            .build()
    }

    fn ctf_error(error: &Error) -> CtfError {
        error.ctf().cloned().expect("source should be CtfError")
    }

    #[test]
    fn for_chain_uses_deployed_custody() -> Result<()> {
        let config = Config::for_chain(crate::POLYGON)?;

        assert_eq!(
            config.custody(),
            address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045")
        );
        Ok(())
    }

    #[test]
    fn for_unknown_chain_should_fail() {
        let err = Config::for_chain(1).unwrap_err();

        assert_eq!(err.kind(), Kind::Internal);
    }

    #[test]
    fn declined_collateral_transfer_should_roll_back_split() {
        let mut collateral = DecliningCollateral::default();
        collateral
            .0
            .mint(USDC, HOLDER, U256::from(100))
            .expect("mint should succeed");
        collateral.0.approve(USDC, HOLDER, CUSTODY, U256::from(100));
        let (mut ctf, condition_id) = prepared(ConditionalTokens::with_collaborators(
            config(),
            collateral,
            Erc1155Ledger::new(),
        ));

        let err = ctf
            .split_position(HOLDER, &split(condition_id, 100))
            .unwrap_err();

        assert_eq!(ctf_error(&err), CtfError::CollateralTransferFailed(USDC));
        assert_eq!(ctf.collateral().balance_of(USDC, HOLDER), U256::from(100));
        assert_eq!(ctf.custody_balance(USDC), U256::ZERO);
        assert_eq!(ctf.events().len(), 1, "only the preparation is logged");
    }

    #[test]
    fn failed_mint_should_return_pulled_collateral() {
        let mut collateral = Erc20Collateral::new();
        collateral
            .mint(USDC, HOLDER, U256::from(100))
            .expect("mint should succeed");
        collateral.approve(USDC, HOLDER, CUSTODY, U256::from(100));
        let (mut ctf, condition_id) = prepared(ConditionalTokens::with_collaborators(
            config(),
            collateral,
            FullLedger::default(),
        ));

        let err = ctf
            .split_position(HOLDER, &split(condition_id, 60))
            .unwrap_err();

        assert_eq!(ctf_error(&err), CtfError::Overflow);
        assert_eq!(ctf.collateral().balance_of(USDC, HOLDER), U256::from(100));
        assert_eq!(
            ctf.collateral().allowance(USDC, HOLDER, CUSTODY),
            U256::from(100)
        );
        assert_eq!(ctf.custody_balance(USDC), U256::ZERO);
    }

    /// Condition with `amount` of every position held by [`HOLDER`] and `amount` in custody,
    /// seeded directly so that no split has to go through the collateral.
    fn holding<C, L>(ctf: ConditionalTokens<C, L>, amount: u64) -> (ConditionalTokens<C, L>, B256)
    where
        C: CollateralAsset + Clone,
        L: TokenLedger + Clone,
    {
        let (mut ctf, condition_id) = prepared(ctf);
        let position_ids = ctf.position_ids(USDC, &condition_id);
        let amounts = vec![U256::from(amount); position_ids.len()];
        ctf.ledger_mut()
            .mint_batch(HOLDER, &position_ids, &amounts)
            .expect("mint should succeed");
        (ctf, condition_id)
    }

    fn holdings_of<C, L>(ctf: &ConditionalTokens<C, L>, condition_id: B256) -> Vec<U256>
    where
        C: CollateralAsset + Clone,
        L: TokenLedger + Clone,
    {
        ctf.ledger()
            .balance_of_batch(HOLDER, &ctf.position_ids(USDC, &condition_id))
    }

    fn declining_custody(amount: u64) -> DecliningCollateral {
        let mut collateral = DecliningCollateral::default();
        collateral
            .0
            .mint(USDC, CUSTODY, U256::from(amount))
            .expect("mint should succeed");
        collateral
    }

    #[test]
    fn declined_collateral_transfer_should_restore_merged_positions() {
        let (mut ctf, condition_id) = holding(
            ConditionalTokens::with_collaborators(
                config(),
                declining_custody(100),
                Erc1155Ledger::new(),
            ),
            100,
        );

        let err = ctf
            .merge_positions(
                HOLDER,
                &MergePositionsRequest::builder()
                    .collateral_token(USDC)
                    .condition_id(condition_id)
                    .amount(U256::from(100))
                    .build(),
            )
            .unwrap_err();

        assert_eq!(ctf_error(&err), CtfError::CollateralTransferFailed(USDC));
        assert_eq!(holdings_of(&ctf, condition_id), vec![U256::from(100); 2]);
        assert_eq!(ctf.custody_balance(USDC), U256::from(100));
        assert_eq!(ctf.collateral().balance_of(USDC, HOLDER), U256::ZERO);
        assert_eq!(ctf.events().len(), 1, "only the preparation is logged");
    }

    #[test]
    fn declined_collateral_transfer_should_restore_redeemed_positions() {
        let (mut ctf, condition_id) = holding(
            ConditionalTokens::with_collaborators(
                config(),
                declining_custody(100),
                Erc1155Ledger::new(),
            ),
            100,
        );
        ctf.report_payouts(ORACLE, &ReportPayoutsRequest::for_binary_market(QUESTION, true))
            .expect("report should succeed");

        let err = ctf
            .redeem_positions(
                HOLDER,
                &RedeemPositionsRequest::builder()
                    .collateral_token(USDC)
                    .condition_id(condition_id)
                    .build(),
            )
            .unwrap_err();

        assert_eq!(ctf_error(&err), CtfError::CollateralTransferFailed(USDC));
        assert_eq!(holdings_of(&ctf, condition_id), vec![U256::from(100); 2]);
        assert_eq!(ctf.custody_balance(USDC), U256::from(100));
        assert_eq!(ctf.events().len(), 2, "preparation and resolution only");
    }

    #[test]
    fn empty_custody_should_restore_merged_positions() {
        let (mut ctf, condition_id) = holding(ConditionalTokens::new(config()), 100);

        let err = ctf
            .merge_positions(
                HOLDER,
                &MergePositionsRequest::builder()
                    .collateral_token(USDC)
                    .condition_id(condition_id)
                    .amount(U256::from(100))
                    .build(),
            )
            .unwrap_err();

        assert!(matches!(
            ctf_error(&err),
            CtfError::InsufficientFunds { owner, .. } if owner == CUSTODY
        ));
        assert_eq!(holdings_of(&ctf, condition_id), vec![U256::from(100); 2]);
        assert_eq!(ctf.events().len(), 1, "only the preparation is logged");
    }

    #[test]
    fn merge_on_unprepared_condition_should_fail() {
        let mut ctf = ConditionalTokens::new(config());
        let condition_id = B256::with_last_byte(0xee);

        let err = ctf
            .merge_positions(
                HOLDER,
                &MergePositionsRequest::builder()
                    .collateral_token(USDC)
                    .condition_id(condition_id)
                    .amount(U256::ZERO)
                    .build(),
            )
            .unwrap_err();

        assert_eq!(ctf_error(&err), CtfError::NotPrepared(condition_id));
        assert!(ctf.events().is_empty());
    }

    #[test]
    fn collection_id_rejects_index_past_256() {
        let ctf = ConditionalTokens::new(config());

        let err = ctf
            .collection_id(
                &CollectionIdRequest::builder()
                    .condition_id(B256::ZERO)
                    .outcome_index(256)
                    .build(),
            )
            .unwrap_err();

        assert_eq!(err.kind(), Kind::Validation);
    }

    #[test]
    fn position_ids_follow_registered_slot_count() {
        let (ctf, condition_id) = prepared(ConditionalTokens::new(config()));

        let position_ids = ctf.position_ids(USDC, &condition_id);

        assert_eq!(position_ids.len(), 2);
        assert_eq!(
            position_ids[1],
            ctf.position_id(
                &PositionIdRequest::builder()
                    .collateral_token(USDC)
                    .collection_id(
                        ctf.collection_id(
                            &CollectionIdRequest::builder()
                                .condition_id(condition_id)
                                .outcome_index(1)
                                .build()
                        )
                        .expect("index 1 is valid")
                    )
                    .build()
            )
        );
        assert!(
            ctf.position_ids(USDC, &B256::ZERO).is_empty(),
            "unprepared condition has no positions"
        );
    }

    #[test]
    fn take_events_drains_log() {
        let (mut ctf, condition_id) = prepared(ConditionalTokens::new(config()));

        let events = ctf.take_events();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].condition_id(), condition_id);
        assert!(ctf.events().is_empty());
    }
}
