//! Balance and allowance bookkeeping

use crate::{Address, Result, TokenAmount, TokenError};
use std::collections::HashMap;
use tracing::debug;

/// Fungible token ledger with allowance-based delegated transfers
///
/// There is no ambient caller: every operation names the acting account
/// explicitly, and delegated transfers name both the spender and the owner.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    /// Account balances in base units
    balances: HashMap<Address, TokenAmount>,

    /// Spending allowances keyed by (owner, spender)
    allowances: HashMap<(Address, Address), TokenAmount>,

    /// Total minted supply
    total_supply: TokenAmount,
}

impl TokenLedger {
    /// Create a ledger with the full supply credited to one account
    pub fn new(initial_holder: Address, initial_supply: TokenAmount) -> Self {
        let mut balances = HashMap::new();
        balances.insert(initial_holder, initial_supply);
        Self {
            balances,
            allowances: HashMap::new(),
            total_supply: initial_supply,
        }
    }

    /// Total supply in base units
    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    /// Balance of an account (zero if unknown)
    pub fn balance_of(&self, account: Address) -> TokenAmount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Remaining amount a spender may move on behalf of an owner
    pub fn allowance(&self, owner: Address, spender: Address) -> TokenAmount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Set the spender's allowance over the owner's balance
    ///
    /// An allowance of `TokenAmount::MAX` is treated as unlimited and is
    /// never decremented by `transfer_from`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: TokenAmount) {
        self.allowances.insert((owner, spender), amount);
        debug!(%owner, %spender, amount, "allowance set");
    }

    /// Move tokens between two accounts
    pub fn transfer(&mut self, from: Address, to: Address, amount: TokenAmount) -> Result<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        *self.balances.entry(to).or_insert(0) += amount;

        debug!(%from, %to, amount, "transfer");
        Ok(())
    }

    /// Move tokens on behalf of an owner, consuming allowance
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: TokenAmount,
    ) -> Result<()> {
        let approved = self.allowance(owner, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                available: approved,
            });
        }

        self.transfer(owner, to, amount)?;

        if approved != TokenAmount::MAX {
            self.allowances.insert((owner, spender), approved - amount);
        }
        Ok(())
    }
}
