//! The execution environment a contract sees while it runs.

use crate::codec::encode;
use crate::contract::Deposit;
use crate::error::{BoundaryFault, CallError};
use crate::event::{ContractEvent, EventRecord};
use crate::host::{Host, Input};
use crispy_types::{Address, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Call context of one frame: who called, with how much value, at what time,
/// plus access to the rest of the world for nested calls and events.
pub struct Env<'a> {
    host: &'a mut Host,
    caller: Address,
    address: Address,
    value: u128,
    now: Timestamp,
}

impl<'a> Env<'a> {
    pub(crate) fn new(
        host: &'a mut Host,
        caller: Address,
        address: Address,
        value: u128,
        now: Timestamp,
    ) -> Self {
        Self {
            host,
            caller,
            address,
            value,
            now,
        }
    }

    /// The immediate caller of this frame.
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// The executing contract's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Native value that came with this frame (already credited).
    pub fn value(&self) -> u128 {
        self.value
    }

    /// The transaction's timestamp.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Native balance held by any address.
    pub fn native_balance(&self, account: &Address) -> u128 {
        self.host.account(account).native
    }

    /// Call another address with value and an opaque payload.
    ///
    /// The nested frame is atomic on its own: if it fails, its value transfer
    /// and every effect below it are already rolled back when this returns.
    pub fn call(&mut self, target: Address, value: u128, input: &[u8]) -> Result<Vec<u8>, CallError> {
        self.host
            .call(self.address, target, value, Input::Data(input), self.now)
    }

    /// Send an encoded message and decode the typed return value.
    pub fn call_msg<M, R>(&mut self, target: Address, value: u128, msg: &M) -> Result<R, CallError>
    where
        M: Serialize,
        R: DeserializeOwned,
    {
        let data = self.call(target, value, &encode(msg))?;
        bincode::deserialize(&data)
            .map_err(|e| CallError::Boundary(BoundaryFault::MalformedReturn(e.to_string())))
    }

    /// Tell `target` it received an asset. Accounts without code accept silently.
    pub fn notify_deposit(&mut self, target: Address, deposit: Deposit) -> Result<(), CallError> {
        self.host
            .call(self.address, target, 0, Input::Deposit(deposit), self.now)
            .map(|_| ())
    }

    /// Record an event; discarded if this frame (or any frame above it) fails.
    pub fn emit<E: ContractEvent>(&mut self, event: &E) {
        self.host.state.events.push(EventRecord {
            emitter: self.address,
            name: event.name(),
            data: encode(event),
        });
    }
}
