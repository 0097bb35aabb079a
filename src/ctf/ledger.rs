//! Multi-asset position ledger.
//!
//! [`TokenLedger`] is the seam to the ledger holding position balances keyed by position ID.
//! The engine only mints and burns through it. [`Erc1155Ledger`] is the in-memory implementation;
//! it additionally lets holders move positions between each other.

use std::collections::HashMap;

use alloy::primitives::U256;

use super::error::CtfError;
use crate::Result;
use crate::types::Address;

/// Balances of `(owner, position ID)` pairs.
pub trait TokenLedger {
    /// Credits `amounts[i]` of `ids[i]` to `owner`, all or nothing.
    ///
    /// # Errors
    ///
    /// [`CtfError::LengthMismatch`] or [`CtfError::Overflow`].
    fn mint_batch(&mut self, owner: Address, ids: &[U256], amounts: &[U256]) -> Result<()>;

    /// Debits `amounts[i]` of `ids[i]` from `owner`, all or nothing.
    ///
    /// # Errors
    ///
    /// [`CtfError::LengthMismatch`] or [`CtfError::InsufficientBalance`] if any single balance is
    /// short. No balance changes in that case.
    fn burn_batch(&mut self, owner: Address, ids: &[U256], amounts: &[U256]) -> Result<()>;

    fn balance_of(&self, owner: Address, id: U256) -> U256;

    fn balance_of_batch(&self, owner: Address, ids: &[U256]) -> Vec<U256> {
        ids.iter().map(|&id| self.balance_of(owner, id)).collect()
    }
}

/// In-memory ERC-1155 style ledger.
#[derive(Debug, Clone, Default)]
pub struct Erc1155Ledger {
    balances: HashMap<(Address, U256), U256>,
}

fn check_lengths(ids: &[U256], amounts: &[U256]) -> std::result::Result<(), CtfError> {
    if ids.len() == amounts.len() {
        Ok(())
    } else {
        Err(CtfError::LengthMismatch {
            ids: ids.len(),
            amounts: amounts.len(),
        })
    }
}

impl Erc1155Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `amount` of position `id` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`CtfError::InsufficientBalance`] if `from` holds less than `amount`.
    pub fn transfer(&mut self, from: Address, to: Address, id: U256, amount: U256) -> Result<()> {
        let balance = self.balance_of(from, id);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(CtfError::InsufficientBalance {
                owner: from,
                position_id: id,
                balance,
                required: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to, id)
            .checked_add(amount)
            .ok_or(CtfError::Overflow)?;

        self.set_balance(from, id, remaining);
        self.set_balance(to, id, credited);
        Ok(())
    }

    fn set_balance(&mut self, owner: Address, id: U256, balance: U256) {
        if balance.is_zero() {
            self.balances.remove(&(owner, id));
        } else {
            self.balances.insert((owner, id), balance);
        }
    }

    /// Every `(owner, position ID, balance)` entry with a non-zero balance, in no particular order.
    pub fn holdings(&self) -> impl Iterator<Item = (Address, U256, U256)> + '_ {
        self.balances
            .iter()
            .map(|(&(owner, id), &balance)| (owner, id, balance))
    }
}

impl TokenLedger for Erc1155Ledger {
    fn mint_batch(&mut self, owner: Address, ids: &[U256], amounts: &[U256]) -> Result<()> {
        check_lengths(ids, amounts)?;

        let mut staged: HashMap<U256, U256> = HashMap::with_capacity(ids.len());
        for (&id, &amount) in ids.iter().zip(amounts) {
            let current = staged
                .get(&id)
                .copied()
                .unwrap_or_else(|| self.balance_of(owner, id));
            staged.insert(id, current.checked_add(amount).ok_or(CtfError::Overflow)?);
        }

        for (id, balance) in staged {
            self.set_balance(owner, id, balance);
        }
        Ok(())
    }

    fn burn_batch(&mut self, owner: Address, ids: &[U256], amounts: &[U256]) -> Result<()> {
        check_lengths(ids, amounts)?;

        let mut staged: HashMap<U256, U256> = HashMap::with_capacity(ids.len());
        for (&id, &amount) in ids.iter().zip(amounts) {
            let balance = staged
                .get(&id)
                .copied()
                .unwrap_or_else(|| self.balance_of(owner, id));
            let remaining = balance
                .checked_sub(amount)
                .ok_or(CtfError::InsufficientBalance {
                    owner,
                    position_id: id,
                    balance,
                    required: amount,
                })?;
            staged.insert(id, remaining);
        }

        for (id, balance) in staged {
            self.set_balance(owner, id, balance);
        }
        Ok(())
    }

    fn balance_of(&self, owner: Address, id: U256) -> U256 {
        self.balances
            .get(&(owner, id))
            .copied()
            .unwrap_or_default()
    }
}
