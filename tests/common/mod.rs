#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Not every test file uses every fixture"
)]

use ctf_ledger::ctf::types::{
    MergePositionsRequest, PrepareConditionRequest, RedeemPositionsRequest, ReportPayoutsRequest,
    SplitPositionRequest,
};
use ctf_ledger::ctf::{Config, ConditionalTokens, CtfError};
use ctf_ledger::error::Error;
use ctf_ledger::types::{Address, B256, U256, address};

pub const USDC: Address = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
pub const DAI: Address = address!("0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063");

pub const ORACLE: Address = address!("0x00000000000000000000000000000000000000a1");
pub const HOLDER: Address = address!("0x00000000000000000000000000000000000000b2");
pub const OTHER_HOLDER: Address = address!("0x00000000000000000000000000000000000000b3");
pub const CUSTODY: Address = address!("0x00000000000000000000000000000000000000c3");

pub const QUESTION: B256 = B256::with_last_byte(0x51);

pub const INITIAL_FUNDS: u64 = 1_000;

/// Engine whose holders each own [`INITIAL_FUNDS`] USDC, fully approved to custody.
#[must_use]
pub fn engine() -> ConditionalTokens {
    let mut ctf = ConditionalTokens::new(Config::builder().custody(CUSTODY).build());

    for holder in [HOLDER, OTHER_HOLDER] {
        let collateral = ctf.collateral_mut();
        collateral
            .mint(USDC, holder, U256::from(INITIAL_FUNDS))
            .unwrap();
        collateral.approve(USDC, holder, CUSTODY, U256::MAX);
    }

    ctf
}

pub fn prepare(ctf: &mut ConditionalTokens, outcome_slot_count: u64) -> B256 {
    ctf.prepare_condition(
        &PrepareConditionRequest::builder()
            .oracle(ORACLE)
            .question_id(QUESTION)
            .outcome_slot_count(U256::from(outcome_slot_count))
            .build(),
    )
    .unwrap()
    .conditionId
}

#[must_use]
pub fn report(payouts: &[u64]) -> ReportPayoutsRequest {
    ReportPayoutsRequest::builder()
        .question_id(QUESTION)
        .payouts(payouts.iter().map(|&p| U256::from(p)).collect())
        .build()
}

#[must_use]
pub fn split(condition_id: B256, amount: u64) -> SplitPositionRequest {
    SplitPositionRequest::builder()
        .collateral_token(USDC)
        .condition_id(condition_id)
        .amount(U256::from(amount))
        .build()
}

#[must_use]
pub fn merge(condition_id: B256, amount: u64) -> MergePositionsRequest {
    MergePositionsRequest::builder()
        .collateral_token(USDC)
        .condition_id(condition_id)
        .amount(U256::from(amount))
        .build()
}

#[must_use]
pub fn redeem(condition_id: B256) -> RedeemPositionsRequest {
    RedeemPositionsRequest::builder()
        .collateral_token(USDC)
        .condition_id(condition_id)
        .build()
}

/// Balances of `owner` in every outcome position of `condition_id`, by outcome index.
#[must_use]
pub fn position_balances(ctf: &ConditionalTokens, owner: Address, condition_id: B256) -> Vec<U256> {
    ctf.position_ids(USDC, &condition_id)
        .into_iter()
        .map(|id| ctf.balance_of(owner, id))
        .collect()
}

#[must_use]
pub fn collateral_balance(ctf: &ConditionalTokens, owner: Address) -> U256 {
    use ctf_ledger::ctf::CollateralAsset as _;

    ctf.collateral().balance_of(USDC, owner)
}

#[must_use]
pub fn ctf_error(error: &Error) -> CtfError {
    error.ctf().cloned().unwrap()
}
