use crispy_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasuryMsg {
    /// Owner only. Sends `value` of the treasury's native balance and
    /// `payload` to `target`; returns the callee's return data unchanged.
    /// An empty payload is a plain native transfer.
    CallDirect {
        target: Address,
        value: u128,
        payload: Vec<u8>,
    },
    TransferOwnership { new_owner: Address },
    RenounceOwnership,
    /// -> `Address`
    Owner,
}
