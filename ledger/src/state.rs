//! Token accounting as a plain state machine.
//!
//! Every method validates all of its preconditions before touching any
//! field, so an `Err` always leaves the state exactly as it was.

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crispy_types::{units, Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum total supply: 100 million tokens.
pub const HARD_CAP: u128 = units(100_000_000);

pub const NAME: &str = "Crispy";
pub const SYMBOL: &str = "CRSP";
pub const DECIMALS: u8 = 18;

/// An allowance of `u128::MAX` is never spent down.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    owner: Address,
    total_supply: u128,
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<(Address, Address), u128>,
    /// Absent means unlocked.
    locked_until: BTreeMap<Address, Timestamp>,
}

impl TokenState {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn locked_until(&self, account: &Address) -> Timestamp {
        self.locked_until
            .get(account)
            .copied()
            .unwrap_or(Timestamp::EPOCH)
    }

    pub fn is_locked(&self, account: &Address, now: Timestamp) -> bool {
        self.locked_until(account) > now
    }

    /// Sum of all balances; equals `total_supply` in every reachable state.
    pub fn balance_sum(&self) -> Option<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
    }

    // ── ownership ───────────────────────────────────────────────────────

    fn ensure_owner(&self, caller: Address) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotOwner { caller });
        }
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress("owner"));
        }
        Ok(self.set_owner(new_owner))
    }

    /// Give up ownership for good; nobody can mint afterwards.
    pub fn renounce_ownership(&mut self, caller: Address) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        Ok(self.set_owner(Address::ZERO))
    }

    fn set_owner(&mut self, new_owner: Address) -> LedgerEvent {
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        LedgerEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }
    }

    // ── supply ──────────────────────────────────────────────────────────

    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress("mint recipient"));
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .filter(|s| *s <= HARD_CAP)
            .ok_or(LedgerError::HardCapExceeded {
                supply: self.total_supply,
                requested: amount,
                cap: HARD_CAP,
            })?;
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(LedgerEvent::Transfer {
            from: Address::ZERO,
            to,
            amount,
        })
    }

    // ── transfers ───────────────────────────────────────────────────────

    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_unlocked(&from, now)?;
        self.move_balance(from, to, amount)
    }

    /// Spend `spender`'s allowance over `from`'s balance.
    ///
    /// The lock applies to `from`, whoever submits the transfer.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_unlocked(&from, now)?;
        let allowance = self.allowance(&from, &spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: from,
                spender,
                needed: amount,
                available: allowance,
            });
        }
        let event = self.move_balance(from, to, amount)?;
        if allowance != UNLIMITED_ALLOWANCE {
            self.allowances.insert((from, spender), allowance - amount);
        }
        Ok(event)
    }

    fn ensure_unlocked(&self, account: &Address, now: Timestamp) -> Result<(), LedgerError> {
        let until = self.locked_until(account);
        if until > now {
            return Err(LedgerError::SenderLocked {
                account: *account,
                until,
            });
        }
        Ok(())
    }

    fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::ZeroAddress("sender"));
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress("recipient"));
        }
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                needed: amount,
                available,
            });
        }
        if from != to {
            let credited = self
                .balance_of(&to)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?;
            self.balances.insert(from, available - amount);
            self.balances.insert(to, credited);
        }
        Ok(LedgerEvent::Transfer { from, to, amount })
    }

    // ── allowances ──────────────────────────────────────────────────────

    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress("spender"));
        }
        self.allowances.insert((owner, spender), amount);
        Ok(LedgerEvent::Approval {
            owner,
            spender,
            amount,
        })
    }

    pub fn increase_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        added: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        let amount = self
            .allowance(&owner, &spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow)?;
        self.approve(owner, spender, amount)
    }

    pub fn decrease_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        subtracted: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        let current = self.allowance(&owner, &spender);
        let amount = current
            .checked_sub(subtracted)
            .ok_or(LedgerError::AllowanceBelowZero {
                current,
                decrease: subtracted,
            })?;
        self.approve(owner, spender, amount)
    }

    // ── locks ───────────────────────────────────────────────────────────

    /// Lock `account`'s outbound transfers until `until`.
    ///
    /// `until` must be in the future. While a lock is active it can only be
    /// extended; an expired lock can be set to anything in the future.
    pub fn lock_balance_until(
        &mut self,
        account: Address,
        until: Timestamp,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        if until <= now {
            return Err(LedgerError::LockNotInFuture { until, now });
        }
        let previous = self.locked_until(&account);
        if previous > now && until < previous {
            return Err(LedgerError::LockDecrease {
                current: previous,
                requested: until,
            });
        }
        self.locked_until.insert(account, until);
        Ok(LedgerEvent::BalanceLocked {
            account,
            previous,
            until,
        })
    }
}
