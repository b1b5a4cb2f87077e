use crispy_chain::{CallError, ChainError};
use crispy_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("allocations total {total_bps} bps, more than 10000")]
    AllocationsExceedSupply { total_bps: u64 },

    #[error("invalid governor parameters: {0}")]
    InvalidParams(&'static str),

    #[error("governor deployed at {actual}, treasury was handed to {predicted}")]
    AddressMismatch { predicted: Address, actual: Address },

    #[error("{component} is owned by {actual}, expected {expected}")]
    OwnerChainBroken {
        component: &'static str,
        expected: Address,
        actual: Address,
    },

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("state query failed: {0}")]
    Query(#[from] CallError),
}
