use crate::vote::VoteDirection;
use crispy_chain::ContractEvent;
use crispy_types::{Address, Hash256, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorEvent {
    ActionInitiated {
        call_data_hash: Hash256,
        action_nonce: u64,
        activated_on: Timestamp,
        voting_ends_on: Timestamp,
        call_data: Vec<u8>,
        initiator: Address,
        /// Leg paid to the treasury.
        tax: u128,
        /// Leg escrowed for the finisher.
        finish_reward: u128,
    },
    /// One tally moved from `vote_count_before` to `vote_count_after`.
    VoteChanged {
        account: Address,
        call_data_hash: Hash256,
        action_nonce: u64,
        vote: VoteDirection,
        vote_count_before: u128,
        vote_count_after: u128,
    },
    ActionFinished {
        call_data_hash: Hash256,
        action_nonce: u64,
        executed: bool,
        finisher: Address,
        reward: u128,
    },
}

impl ContractEvent for GovernorEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ActionInitiated { .. } => "ActionInitiated",
            Self::VoteChanged { .. } => "VoteChanged",
            Self::ActionFinished { .. } => "ActionFinished",
        }
    }
}
