use crate::vote::VoteDirection;
use crispy_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorMsg {
    /// Open an action. `call_data` is the payload the treasury receives if
    /// the vote passes. The caller must have approved the total tax.
    InitiateAction { call_data: Vec<u8> },
    Vote { direction: VoteDirection },
    Finish,

    /// -> `u64`
    ActionNonce,
    /// -> `Vec<u8>`
    CallData,
    /// -> `Hash256`
    CallDataHash,
    /// -> `bool`
    Finished,
    /// -> `u128`
    FinishReward,
    /// -> `u128`
    VoteCount { direction: VoteDirection },
    /// -> `Option<VoteRecord>`
    VoteOf { account: Address },
    /// -> `Timestamp`
    ActivatedOn,
    /// -> `Timestamp`
    VotingEndsOn,
    /// -> `u128`
    ActivationThreshold,
    /// -> `u128`
    ActivationTax,
    /// -> `u128`
    FinishRewardShare,
    /// -> `u64`
    VotePeriod,
    /// -> `u128`, the fixed-point one the rates are scaled by
    Scale,
    /// -> `Address`
    Ledger,
    /// -> `Address`
    Treasury,
}
