//! World state and call-frame execution.
//!
//! Every call frame checkpoints by cloning the whole `WorldState`,
//! contracts included, so a transaction costs O(frames x state size).

use crate::contract::{Contract, Deposit};
use crate::env::Env;
use crate::error::{BoundaryFault, CallError};
use crate::event::EventRecord;
use crispy_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Native balance and nonce of one address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub native: u128,
    /// Transactions and deployments submitted so far.
    pub nonce: u64,
}

/// Everything a failed frame has to roll back.
#[derive(Clone, Default)]
pub(crate) struct WorldState {
    pub(crate) accounts: BTreeMap<Address, AccountInfo>,
    pub(crate) contracts: BTreeMap<Address, Box<dyn Contract>>,
    /// Events of the transaction in flight.
    pub(crate) events: Vec<EventRecord>,
}

/// What a frame delivers to its target.
pub(crate) enum Input<'a> {
    /// A payload; empty means a plain native transfer.
    Data(&'a [u8]),
    /// A safe-transfer notification.
    Deposit(Deposit),
}

pub(crate) struct Host {
    pub(crate) state: WorldState,
    /// Contracts currently executing, outermost first. A contract is taken out
    /// of `state.contracts` while it runs, so this is also the re-entrancy guard.
    call_stack: Vec<Address>,
    max_depth: usize,
}

impl Host {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            state: WorldState::default(),
            call_stack: Vec::new(),
            max_depth,
        }
    }

    pub(crate) fn account(&self, address: &Address) -> AccountInfo {
        self.state.accounts.get(address).copied().unwrap_or_default()
    }

    pub(crate) fn is_executing(&self, address: &Address) -> bool {
        self.call_stack.contains(address)
    }

    /// Run one call frame; on failure the world is exactly as before the call.
    pub(crate) fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        input: Input<'_>,
        now: Timestamp,
    ) -> Result<Vec<u8>, CallError> {
        if self.call_stack.len() >= self.max_depth {
            return Err(BoundaryFault::DepthExceeded(self.max_depth).into());
        }
        if self.is_executing(&target) {
            return Err(BoundaryFault::Reentrant(target).into());
        }

        let checkpoint = self.state.clone();
        let result = self.dispatch(caller, target, value, input, now);
        match &result {
            Ok(_) => {
                tracing::trace!(%caller, %target, value, depth = self.call_stack.len(), "call frame committed");
            }
            Err(e) => {
                tracing::trace!(%caller, %target, value, error = %e, "call frame rolled back");
                self.state = checkpoint;
            }
        }
        result
    }

    fn dispatch(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        input: Input<'_>,
        now: Timestamp,
    ) -> Result<Vec<u8>, CallError> {
        self.move_native(caller, target, value)?;

        let Some(mut contract) = self.state.contracts.remove(&target) else {
            return match input {
                Input::Data(data) if !data.is_empty() => Err(BoundaryFault::NoCode(target).into()),
                _ => Ok(Vec::new()),
            };
        };

        self.call_stack.push(target);
        let result = {
            let mut env = Env::new(self, caller, target, value, now);
            match input {
                Input::Data(data) if !data.is_empty() => contract.execute(&mut env, data),
                Input::Data(_) => contract
                    .receive(&mut env, &Deposit::Native { amount: value })
                    .map(|()| Vec::new()),
                Input::Deposit(deposit) => {
                    contract.receive(&mut env, &deposit).map(|()| Vec::new())
                }
            }
        };
        self.call_stack.pop();
        // Reinstalled even on failure; the caller's checkpoint restore discards it.
        self.state.contracts.insert(target, contract);
        result.map_err(CallError::Reverted)
    }

    pub(crate) fn move_native(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), BoundaryFault> {
        if amount == 0 || from == to {
            return Ok(());
        }
        let available = self.account(&from).native;
        if available < amount {
            return Err(BoundaryFault::InsufficientValue {
                account: from,
                needed: amount,
                available,
            });
        }
        let credited = self
            .account(&to)
            .native
            .checked_add(amount)
            .ok_or(BoundaryFault::ValueOverflow(to))?;
        self.state.accounts.entry(from).or_default().native = available - amount;
        self.state.accounts.entry(to).or_default().native = credited;
        Ok(())
    }
}
