//! The governor: one action at a time, opened by paying an activation tax,
//! decided by live ledger balances, executed through the treasury.
//!
//! Lifecycle: idle (`finished`) → `InitiateAction` → votes until
//! `voting_ends_on` → `Finish` → idle. Vote weight is the voter's balance
//! when the vote is cast; nothing here locks it. Voters who want their
//! weight to count only once lock their own balance on the ledger first.

pub mod contract;
pub mod error;
pub mod event;
pub mod msg;
pub mod proposal;
pub mod vote;

pub use contract::GovernorContract;
pub use error::GovernorError;
pub use event::GovernorEvent;
pub use msg::GovernorMsg;
pub use proposal::{ActionState, Activation, Conclusion};
pub use vote::{TallyChange, VoteDirection, VoteRecord};
