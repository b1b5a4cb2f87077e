//! Events emitted by contracts.

use crispy_types::Address;
use serde::Serialize;

/// A typed contract event.
///
/// Each contract crate defines one event enum; `name` is the stable
/// per-variant identifier recorded alongside the encoded payload.
pub trait ContractEvent: Serialize {
    fn name(&self) -> &'static str;
}

/// One emitted event, as stored in a receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub emitter: Address,
    pub name: &'static str,
    pub data: Vec<u8>,
}
