//! CTF (Conditional Token Framework) ledger engine.
//!
//! The Conditional Token Framework tokenizes the outcomes of a condition as positions backed
//! one-to-one by collateral. This module implements the non-combinatorial variant: every
//! position covers exactly one outcome slot of one condition, directly on top of collateral.
//!
//! # Features
//!
//! - **ID Calculation**: Compute condition IDs, collection IDs, and position IDs ([`ids`])
//! - **Condition lifecycle**: Prepare conditions and report their payouts ([`registry`])
//! - **Splitting**: Convert collateral into one position per outcome slot
//! - **Merging**: Combine a full set of positions back into collateral
//! - **Redemption**: Redeem positions for their share of collateral after resolution
//!
//! Identifiers are byte-for-byte compatible with the Gnosis Conditional Tokens contract, so a
//! condition prepared here has the same ID as one prepared on chain.
//!
//! # Example
//!
//! ```
//! use ctf_ledger::ctf::{Config, ConditionalTokens};
//! use ctf_ledger::ctf::types::{ConditionIdRequest, PrepareConditionRequest};
//! use ctf_ledger::types::{B256, U256, address};
//!
//! # fn main() -> ctf_ledger::Result<()> {
//! let oracle = address!("0x0000000000000000000000000000000000000001");
//! let mut ctf = ConditionalTokens::new(Config::for_chain(ctf_ledger::POLYGON)?);
//!
//! let prepared = ctf.prepare_condition(&PrepareConditionRequest::for_binary_market(
//!     oracle,
//!     B256::ZERO,
//! ))?;
//!
//! let condition_id = ctf.condition_id(
//!     &ConditionIdRequest::builder()
//!         .oracle(oracle)
//!         .question_id(B256::ZERO)
//!         .outcome_slot_count(U256::from(2))
//!         .build(),
//! );
//! assert_eq!(prepared.conditionId, condition_id);
//! assert_eq!(ctf.outcome_slot_count(&condition_id), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Resources
//!
//! - [Gnosis CTF Source Code](https://github.com/gnosis/conditional-tokens-contracts)

pub mod collateral;
pub mod engine;
mod error;
pub mod ids;
pub mod ledger;
pub mod registry;
pub mod types;

pub use collateral::{CollateralAsset, Erc20Collateral};
pub use engine::{Config, ConditionalTokens};
pub use error::CtfError;
pub use ledger::{Erc1155Ledger, TokenLedger};
pub use registry::{Condition, ConditionRegistry, ConditionStatus};
