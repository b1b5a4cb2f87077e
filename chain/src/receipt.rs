//! Transaction receipts.

use crate::event::EventRecord;
use crispy_types::{Address, Timestamp};
use serde::de::DeserializeOwned;

/// Result of a committed transaction.
#[derive(Clone, Debug)]
pub struct Receipt {
    pub from: Address,
    pub to: Address,
    /// Nonce the transaction consumed.
    pub nonce: u64,
    pub timestamp: Timestamp,
    pub return_data: Vec<u8>,
    /// Events of every frame that committed, in emission order.
    pub events: Vec<EventRecord>,
}

impl Receipt {
    /// Decode the top-level call's return data.
    pub fn decode_return<R: DeserializeOwned>(&self) -> Result<R, bincode::Error> {
        bincode::deserialize(&self.return_data)
    }

    /// Events emitted by one contract.
    pub fn events_from(&self, emitter: Address) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().filter(move |e| e.emitter == emitter)
    }

    /// Decode every event emitted by `emitter` as that contract's event enum.
    pub fn decode_events<E: DeserializeOwned>(&self, emitter: Address) -> Vec<E> {
        self.events_from(emitter)
            .filter_map(|e| bincode::deserialize(&e.data).ok())
            .collect()
    }
}
