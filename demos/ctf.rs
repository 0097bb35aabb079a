//! CTF (Conditional Token Framework) ledger example.
//!
//! This example walks one binary market through its full lifecycle:
//! - Calculate condition IDs, collection IDs, and position IDs
//! - Split USDC collateral into outcome positions (YES/NO)
//! - Merge part of the positions back into USDC
//! - Resolve the market and redeem the winning positions
//!
//! ## Usage
//!
//! ```sh
//! RUST_LOG=debug cargo run --example ctf --features tracing
//! ```

use anyhow::Result;
use ctf_ledger::POLYGON;
use ctf_ledger::ctf::types::{
    CollectionIdRequest, ConditionIdRequest, MergePositionsRequest, PositionIdRequest,
    PrepareConditionRequest, RedeemPositionsRequest, ReportPayoutsRequest, SplitPositionRequest,
};
use ctf_ledger::ctf::{Config, ConditionalTokens};
use ctf_ledger::types::{B256, U256, address};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("=== CTF (Conditional Token Framework) Example ===");

    let config = Config::for_chain(POLYGON)?;
    let custody = config.custody();
    let mut ctf = ConditionalTokens::new(config);
    info!("Custody: {custody}");

    let usdc = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    let oracle = address!("0x0000000000000000000000000000000000000001");
    let holder = address!("0x00000000000000000000000000000000000000b2");
    let question_id = B256::ZERO;

    // 10 USDC (6 decimals), fully approved to custody
    let collateral = ctf.collateral_mut();
    collateral.mint(usdc, holder, U256::from(10_000_000))?;
    collateral.approve(usdc, holder, custody, U256::MAX);

    info!("--- Calculating IDs ---");
    let condition_id = ctf.condition_id(
        &ConditionIdRequest::builder()
            .oracle(oracle)
            .question_id(question_id)
            .outcome_slot_count(U256::from(2))
            .build(),
    );
    info!("→ Condition ID: {condition_id}");

    for (label, outcome_index) in [("YES", 0), ("NO", 1)] {
        let collection_id = ctf.collection_id(
            &CollectionIdRequest::builder()
                .condition_id(condition_id)
                .outcome_index(outcome_index)
                .build(),
        )?;
        let position_id = ctf.position_id(
            &PositionIdRequest::builder()
                .collateral_token(usdc)
                .collection_id(collection_id)
                .build(),
        );
        info!("{label} collection: {collection_id}");
        info!("{label} position (ERC1155 token ID): {position_id}");
    }

    info!("--- Preparing Condition ---");
    ctf.prepare_condition(&PrepareConditionRequest::for_binary_market(
        oracle,
        question_id,
    ))?;
    info!("Status: {}", ctf.status(&condition_id));

    info!("--- Splitting Position ---");
    ctf.split_position(
        holder,
        &SplitPositionRequest::builder()
            .collateral_token(usdc)
            .condition_id(condition_id)
            .amount(U256::from(5_000_000))
            .build(),
    )?;
    info!("Custody holds {} USDC units", ctf.custody_balance(usdc));

    info!("--- Merging Positions ---");
    let merge = MergePositionsRequest::builder()
        .collateral_token(usdc)
        .condition_id(condition_id)
        .amount(U256::from(2_000_000))
        .build();
    ctf.merge_positions(holder, &merge)?;

    // Rejected without side effects: only 3 USDC worth of positions remain
    let oversized = MergePositionsRequest::builder()
        .collateral_token(usdc)
        .condition_id(condition_id)
        .amount(U256::from(4_000_000))
        .build();
    if let Err(e) = ctf.merge_positions(holder, &oversized) {
        error!("✗ Merge failed: {e}");
    }

    info!("--- Resolving Condition ---");
    ctf.report_payouts(
        oracle,
        &ReportPayoutsRequest::for_binary_market(question_id, true),
    )?;
    info!("Status: {}", ctf.status(&condition_id));

    info!("--- Redeeming Positions ---");
    let redemption = ctf.redeem_positions(
        holder,
        &RedeemPositionsRequest::builder()
            .collateral_token(usdc)
            .condition_id(condition_id)
            .build(),
    )?;
    info!("✓ Redeemed {} USDC units", redemption.payout);

    info!("--- Event Log ---");
    for event in ctf.events() {
        info!("{event}: topic0 = {}", event.signature_hash());
    }

    info!("=== Example Complete ===");

    Ok(())
}
