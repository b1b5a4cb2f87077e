use crispy_chain::{CallError, Revert};
use crispy_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GovernorError {
    #[error("an action is already in progress")]
    ActionInProgress,

    #[error("no action in progress")]
    NoActiveAction,

    #[error("voting closed at {ended}")]
    VotingClosed { ended: Timestamp },

    #[error("voting ends at {ends}, now is {now}")]
    VotingNotEnded { ends: Timestamp, now: Timestamp },

    #[error("{account} has no ledger balance to vote with")]
    NoVoteWeight { account: Address },

    #[error("unknown vote direction {0}")]
    UnknownDirection(u8),

    #[error("activation tax could not be collected: {source}")]
    TaxCollectionFailed {
        #[source]
        source: CallError,
    },

    #[error("vote weight lookup failed: {source}")]
    WeightQueryFailed {
        #[source]
        source: CallError,
    },

    #[error("action execution through the treasury failed: {source}")]
    ExecutionFailed {
        #[source]
        source: CallError,
    },

    #[error("finish reward payout failed: {source}")]
    RewardPayoutFailed {
        #[source]
        source: CallError,
    },

    #[error("invalid governor parameters: {0}")]
    InvalidParams(&'static str),

    #[error("arithmetic overflow in governor accounting")]
    Overflow,
}

impl GovernorError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ActionInProgress => "governor.action_in_progress",
            Self::NoActiveAction => "governor.no_active_action",
            Self::VotingClosed { .. } => "governor.voting_closed",
            Self::VotingNotEnded { .. } => "governor.voting_not_ended",
            Self::NoVoteWeight { .. } => "governor.no_vote_weight",
            Self::UnknownDirection(_) => "governor.unknown_direction",
            Self::TaxCollectionFailed { .. } => "governor.tax_collection_failed",
            Self::WeightQueryFailed { .. } => "governor.weight_query_failed",
            Self::ExecutionFailed { .. } => "governor.execution_failed",
            Self::RewardPayoutFailed { .. } => "governor.reward_payout_failed",
            Self::InvalidParams(_) => "governor.invalid_params",
            Self::Overflow => "governor.overflow",
        }
    }

    fn cause(&self) -> Option<&CallError> {
        match self {
            Self::TaxCollectionFailed { source }
            | Self::WeightQueryFailed { source }
            | Self::ExecutionFailed { source }
            | Self::RewardPayoutFailed { source } => Some(source),
            _ => None,
        }
    }
}

impl From<GovernorError> for Revert {
    fn from(err: GovernorError) -> Self {
        let revert = Revert::new(err.code(), err.to_string());
        match err.cause() {
            Some(cause) => revert.with_cause(cause.clone()),
            None => revert,
        }
    }
}
