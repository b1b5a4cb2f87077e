use crispy_chain::ContractEvent;
use crispy_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Balance moved. Mints come from the zero address.
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
    BalanceLocked {
        account: Address,
        previous: Timestamp,
        until: Timestamp,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl ContractEvent for LedgerEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::BalanceLocked { .. } => "BalanceLocked",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}
