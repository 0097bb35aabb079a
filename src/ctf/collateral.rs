//! Collateral backing every position.
//!
//! [`CollateralAsset`] is the seam to the token that backs positions. The engine pulls collateral
//! into custody on split and pays it back out on merge and redeem. [`Erc20Collateral`] is an
//! in-memory book of fungible tokens with the usual mint/approve/transfer semantics.

use std::collections::HashMap;

use alloy::primitives::U256;

use super::error::CtfError;
use crate::Result;
use crate::types::Address;

/// Transferable-balance collateral tokens, addressed by token identity.
pub trait CollateralAsset {
    /// Moves `amount` of `token` from `from` to `to`, spending `spender`'s allowance.
    ///
    /// Returns `Ok(false)` if the token declined the transfer without an error.
    ///
    /// # Errors
    ///
    /// [`CtfError::InsufficientAllowance`] or [`CtfError::InsufficientFunds`].
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool>;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`CtfError::InsufficientFunds`].
    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: U256)
    -> Result<bool>;

    fn balance_of(&self, token: Address, owner: Address) -> U256;
}

#[derive(Debug, Clone, Default)]
struct TokenBook {
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl TokenBook {
    fn balance(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> std::result::Result<(), CtfError> {
        let balance = self.balance(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(CtfError::InsufficientFunds {
                token,
                owner: from,
                balance,
                required: amount,
            })?;
        // Self-transfers leave the balance unchanged.
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(CtfError::Overflow)?;

        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }
}

/// In-memory fungible collateral tokens.
#[derive(Debug, Clone, Default)]
pub struct Erc20Collateral {
    tokens: HashMap<Address, TokenBook>,
}

impl Erc20Collateral {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `token` out of thin air for `to`.
    ///
    /// # Errors
    ///
    /// [`CtfError::Overflow`] if the total supply would exceed `U256::MAX`.
    pub fn mint(&mut self, token: Address, to: Address, amount: U256) -> Result<()> {
        let book = self.tokens.entry(token).or_default();
        let total_supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(CtfError::Overflow)?;
        let balance = book.balance(to).checked_add(amount).ok_or(CtfError::Overflow)?;

        book.total_supply = total_supply;
        book.balances.insert(to, balance);
        Ok(())
    }

    /// Sets the amount `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.tokens
            .entry(token)
            .or_default()
            .allowances
            .insert((owner, spender), amount);
    }

    #[must_use]
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.tokens
            .get(&token)
            .map(|book| book.allowance(owner, spender))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn total_supply(&self, token: Address) -> U256 {
        self.tokens
            .get(&token)
            .map(|book| book.total_supply)
            .unwrap_or_default()
    }
}

impl CollateralAsset for Erc20Collateral {
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool> {
        let book = self.tokens.entry(token).or_default();
        let allowance = book.allowance(from, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(CtfError::InsufficientAllowance {
                token,
                owner: from,
                spender,
                allowance,
                required: amount,
            })?;

        book.move_balance(token, from, to, amount)?;
        book.allowances.insert((from, spender), remaining);
        Ok(true)
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool> {
        self.tokens
            .entry(token)
            .or_default()
            .move_balance(token, from, to, amount)?;
        Ok(true)
    }

    fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.tokens
            .get(&token)
            .map(|book| book.balance(owner))
            .unwrap_or_default()
    }
}
