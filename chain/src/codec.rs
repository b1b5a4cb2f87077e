//! Bincode helpers for payloads, return data, and events.

use crate::error::Revert;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a message, return value, or event.
///
/// Plain in-memory values always encode; an empty buffer is returned otherwise.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    bincode::serialize(value).unwrap_or_default()
}

/// Decode a contract's input payload into its message enum.
pub fn decode_input<T: DeserializeOwned>(input: &[u8]) -> Result<T, Revert> {
    bincode::deserialize(input).map_err(|e| Revert::new("payload.malformed", e.to_string()))
}
