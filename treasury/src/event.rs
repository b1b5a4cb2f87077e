use crispy_chain::{ContractEvent, Deposit};
use crispy_types::{Address, Hash256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasuryEvent {
    DepositReceived {
        /// Immediate caller: the donor for native value, the asset contract otherwise.
        sender: Address,
        deposit: Deposit,
    },
    CallExecuted {
        target: Address,
        value: u128,
        payload_hash: Hash256,
    },
    NativeSent {
        to: Address,
        amount: u128,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl ContractEvent for TreasuryEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::DepositReceived { .. } => "DepositReceived",
            Self::CallExecuted { .. } => "CallExecuted",
            Self::NativeSent { .. } => "NativeSent",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}
