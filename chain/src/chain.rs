//! Public host API: transactions, deployments, queries.

use crate::codec::encode;
use crate::contract::{Contract, DeployContext};
use crate::error::{CallError, ChainError, Revert};
use crate::host::{Host, Input};
use crate::receipt::Receipt;
use crispy_crypto::contract_address;
use crispy_types::{Address, Clock, SystemClock, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::host::AccountInfo;

/// Nested call limit per transaction.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// A single-threaded, serially-ordered chain.
///
/// Every mutating method is one indivisible transaction. Nothing runs
/// concurrently, so interleavings are purely a matter of submission order.
pub struct Chain {
    host: Host,
    clock: Box<dyn Clock>,
}

impl Chain {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_max_depth(clock, DEFAULT_MAX_CALL_DEPTH)
    }

    pub fn with_max_depth(clock: impl Clock + 'static, max_depth: usize) -> Self {
        Self {
            host: Host::new(max_depth),
            clock: Box::new(clock),
        }
    }

    /// A chain that timestamps transactions with wall-clock time.
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock)
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn account(&self, address: &Address) -> AccountInfo {
        self.host.account(address)
    }

    pub fn native_balance(&self, address: &Address) -> u128 {
        self.host.account(address).native
    }

    /// The nonce the next transaction or deployment from `address` consumes.
    pub fn nonce_of(&self, address: &Address) -> u64 {
        self.host.account(address).nonce
    }

    pub fn is_contract(&self, address: &Address) -> bool {
        self.host.state.contracts.contains_key(address)
    }

    /// Borrow a deployed contract's state by concrete type.
    pub fn contract<T: Contract>(&self, address: &Address) -> Option<&T> {
        self.host
            .state
            .contracts
            .get(address)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Credit native value to an address (dev/test faucet).
    pub fn fund(&mut self, address: Address, amount: u128) -> Result<(), ChainError> {
        let account = self.host.state.accounts.entry(address).or_default();
        account.native = account
            .native
            .checked_add(amount)
            .ok_or(ChainError::BalanceOverflow(address))?;
        Ok(())
    }

    /// Deploy a contract at `contract_address(deployer, nonce)`.
    ///
    /// The deployer's nonce is consumed even if the constructor fails.
    pub fn deploy<C, F>(&mut self, deployer: Address, init: F) -> Result<Address, ChainError>
    where
        C: Contract,
        F: FnOnce(&DeployContext) -> Result<C, Revert>,
    {
        let nonce = self.consume_nonce(deployer)?;
        let address = contract_address(&deployer, nonce);
        if self.is_contract(&address) {
            return Err(ChainError::AddressCollision(address));
        }
        let ctx = DeployContext {
            deployer,
            address,
            now: self.clock.now(),
        };
        let contract = init(&ctx).map_err(ChainError::Constructor)?;
        tracing::debug!(%deployer, %address, nonce, kind = contract.kind(), "contract deployed");
        self.host.state.contracts.insert(address, Box::new(contract));
        Ok(address)
    }

    /// Submit a transaction with a raw payload.
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        value: u128,
        payload: &[u8],
    ) -> Result<Receipt, ChainError> {
        let nonce = self.consume_nonce(from)?;
        let timestamp = self.clock.now();
        self.host.state.events.clear();

        let result = self
            .host
            .call(from, to, value, Input::Data(payload), timestamp);
        let events = std::mem::take(&mut self.host.state.events);

        match result {
            Ok(return_data) => Ok(Receipt {
                from,
                to,
                nonce,
                timestamp,
                return_data,
                events,
            }),
            Err(source) => {
                tracing::warn!(%from, %to, nonce, code = source.code(), "transaction failed");
                Err(ChainError::Transaction {
                    from,
                    nonce,
                    source,
                })
            }
        }
    }

    /// Submit a transaction carrying an encoded message.
    pub fn send<M: Serialize>(
        &mut self,
        from: Address,
        to: Address,
        value: u128,
        msg: &M,
    ) -> Result<Receipt, ChainError> {
        self.transact(from, to, value, &encode(msg))
    }

    /// Plain native transfer (empty payload).
    pub fn transfer_native(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<Receipt, ChainError> {
        self.transact(from, to, amount, &[])
    }

    /// Execute a read against a throwaway copy of the world.
    pub fn query(&mut self, to: Address, payload: &[u8]) -> Result<Vec<u8>, CallError> {
        let checkpoint = self.host.state.clone();
        let now = self.clock.now();
        let result = self
            .host
            .call(Address::ZERO, to, 0, Input::Data(payload), now);
        self.host.state = checkpoint;
        result
    }

    /// Typed [`query`](Self::query).
    pub fn query_msg<M, R>(&mut self, to: Address, msg: &M) -> Result<R, CallError>
    where
        M: Serialize,
        R: DeserializeOwned,
    {
        let data = self.query(to, &encode(msg))?;
        bincode::deserialize(&data).map_err(|e| {
            CallError::Boundary(crate::error::BoundaryFault::MalformedReturn(e.to_string()))
        })
    }

    fn consume_nonce(&mut self, address: Address) -> Result<u64, ChainError> {
        let account = self.host.state.accounts.entry(address).or_default();
        let nonce = account.nonce;
        account.nonce = nonce
            .checked_add(1)
            .ok_or(ChainError::NonceOverflow(address))?;
        Ok(nonce)
    }
}
