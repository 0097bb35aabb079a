#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod ctf;
pub mod error;
pub mod types;

use alloy::primitives::ChainId;
use phf::phf_map;

use crate::error::Error;
use crate::types::{Address, address};

pub type Result<T> = std::result::Result<T, Error>;

/// [`ChainId`] for Polygon mainnet
pub const POLYGON: ChainId = 137;

/// [`ChainId`] for Polygon testnet <https://polygon.technology/blog/introducing-the-amoy-testnet-for-polygon-pos>
pub const AMOY: ChainId = 80002;

static CONFIG: phf::Map<ChainId, ContractConfig> = phf_map! {
    137_u64 => ContractConfig {
        collateral: address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
        conditional_tokens: address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
    },
    80002_u64 => ContractConfig {
        collateral: address!("0x9c4e1703476e875070ee25b56a58b008cfb8fa78"),
        conditional_tokens: address!("0x69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
    },
};

/// Identities of the deployed conditional tokens engine and its canonical collateral on a chain.
#[non_exhaustive]
#[derive(Debug)]
pub struct ContractConfig {
    /// Canonical collateral token (USDC)
    pub collateral: Address,
    /// Identity that holds collateral in custody on behalf of position holders
    pub conditional_tokens: Address,
}

/// Given a `chain_id`, return the relevant [`ContractConfig`]
#[must_use]
pub fn contract_config(chain_id: ChainId) -> Option<&'static ContractConfig> {
    CONFIG.get(&chain_id)
}
