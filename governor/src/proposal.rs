//! The single in-flight action and its vote tallies.
//!
//! `ActionState` knows nothing about the ledger or treasury: callers supply
//! the vote weight and perform the token movements and execution around it.

use crate::error::GovernorError;
use crate::vote::{TallyChange, VoteDirection, VoteRecord};
use crispy_crypto::hash_payload;
use crispy_types::{Address, Hash256, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    action_nonce: u64,
    call_data: Vec<u8>,
    call_data_hash: Hash256,
    activated_on: Timestamp,
    voting_ends_on: Timestamp,
    finished: bool,
    finish_reward: u128,
    votes_for: u128,
    votes_against: u128,
    voters: BTreeMap<Address, VoteRecord>,
}

/// Identity of an action that was just opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation {
    pub action_nonce: u64,
    pub call_data_hash: Hash256,
    pub activated_on: Timestamp,
    pub voting_ends_on: Timestamp,
}

/// What remains of an action once it is concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conclusion {
    pub action_nonce: u64,
    pub call_data_hash: Hash256,
    pub finish_reward: u128,
    pub votes_for: u128,
    pub votes_against: u128,
}

impl Default for ActionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionState {
    /// Idle: `finished` is true and no nonce has been issued.
    pub fn new() -> Self {
        Self {
            action_nonce: 0,
            call_data: Vec::new(),
            call_data_hash: Hash256::ZERO,
            activated_on: Timestamp::EPOCH,
            voting_ends_on: Timestamp::EPOCH,
            finished: true,
            finish_reward: 0,
            votes_for: 0,
            votes_against: 0,
            voters: BTreeMap::new(),
        }
    }

    pub fn action_nonce(&self) -> u64 {
        self.action_nonce
    }

    pub fn call_data(&self) -> &[u8] {
        &self.call_data
    }

    pub fn call_data_hash(&self) -> Hash256 {
        self.call_data_hash
    }

    pub fn activated_on(&self) -> Timestamp {
        self.activated_on
    }

    pub fn voting_ends_on(&self) -> Timestamp {
        self.voting_ends_on
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn finish_reward(&self) -> u128 {
        self.finish_reward
    }

    pub fn vote_count(&self, direction: VoteDirection) -> u128 {
        match direction {
            VoteDirection::For => self.votes_for,
            VoteDirection::Against => self.votes_against,
        }
    }

    /// The account's vote on the current action, if any.
    pub fn vote_of(&self, voter: &Address) -> Option<VoteRecord> {
        self.voters
            .get(voter)
            .filter(|r| !self.finished && r.action_nonce == self.action_nonce)
            .copied()
    }

    /// Open a new action at `now`.
    pub fn begin(
        &mut self,
        call_data: Vec<u8>,
        finish_reward: u128,
        now: Timestamp,
        vote_period_secs: u64,
    ) -> Result<Activation, GovernorError> {
        if !self.finished {
            return Err(GovernorError::ActionInProgress);
        }
        let action_nonce = self
            .action_nonce
            .checked_add(1)
            .ok_or(GovernorError::Overflow)?;
        let voting_ends_on = now
            .checked_add_secs(vote_period_secs)
            .ok_or(GovernorError::Overflow)?;
        let call_data_hash = hash_payload(&call_data);

        self.action_nonce = action_nonce;
        self.call_data = call_data;
        self.call_data_hash = call_data_hash;
        self.activated_on = now;
        self.voting_ends_on = voting_ends_on;
        self.finished = false;
        self.finish_reward = finish_reward;
        self.votes_for = 0;
        self.votes_against = 0;
        self.voters.clear();

        Ok(Activation {
            action_nonce,
            call_data_hash,
            activated_on: now,
            voting_ends_on,
        })
    }

    /// Record `voter`'s current `weight` toward `direction`.
    ///
    /// A previous vote on this action is withdrawn first, so each voter
    /// contributes to at most one tally with their latest weight. A re-vote
    /// with zero weight only withdraws; a first vote with zero weight is
    /// rejected. Returns the tally changes in the order they were applied,
    /// leaving out tallies whose value did not move.
    pub fn cast(
        &mut self,
        voter: Address,
        direction: VoteDirection,
        weight: u128,
        now: Timestamp,
    ) -> Result<Vec<TallyChange>, GovernorError> {
        if self.finished {
            return Err(GovernorError::NoActiveAction);
        }
        if now >= self.voting_ends_on {
            return Err(GovernorError::VotingClosed {
                ended: self.voting_ends_on,
            });
        }
        let previous = self.vote_of(&voter);
        if weight == 0 && previous.is_none() {
            return Err(GovernorError::NoVoteWeight { account: voter });
        }

        let mut tallies = Tallies {
            votes_for: self.votes_for,
            votes_against: self.votes_against,
        };
        let mut changes = Vec::with_capacity(2);
        match previous {
            Some(prev) if prev.direction == direction => {
                let after = tallies
                    .get(direction)
                    .checked_sub(prev.weight)
                    .and_then(|t| t.checked_add(weight))
                    .ok_or(GovernorError::Overflow)?;
                changes.extend(tallies.set(direction, after));
            }
            Some(prev) => {
                let withdrawn = tallies
                    .get(prev.direction)
                    .checked_sub(prev.weight)
                    .ok_or(GovernorError::Overflow)?;
                changes.extend(tallies.set(prev.direction, withdrawn));
                let added = tallies
                    .get(direction)
                    .checked_add(weight)
                    .ok_or(GovernorError::Overflow)?;
                changes.extend(tallies.set(direction, added));
            }
            None => {
                let added = tallies
                    .get(direction)
                    .checked_add(weight)
                    .ok_or(GovernorError::Overflow)?;
                changes.extend(tallies.set(direction, added));
            }
        }

        self.votes_for = tallies.votes_for;
        self.votes_against = tallies.votes_against;
        if weight == 0 {
            self.voters.remove(&voter);
        } else {
            self.voters.insert(
                voter,
                VoteRecord {
                    action_nonce: self.action_nonce,
                    direction,
                    weight,
                },
            );
        }
        Ok(changes)
    }

    /// Whether the action may be finished at `now`, and if so whether it passed.
    ///
    /// Passing requires strictly more weight for than against; a tie does
    /// not pass.
    pub fn outcome(&self, now: Timestamp) -> Result<bool, GovernorError> {
        if self.finished {
            return Err(GovernorError::NoActiveAction);
        }
        if now < self.voting_ends_on {
            return Err(GovernorError::VotingNotEnded {
                ends: self.voting_ends_on,
                now,
            });
        }
        Ok(self.votes_for > self.votes_against)
    }

    /// Close the action: clear the payload and return to idle.
    ///
    /// The nonce, timestamps and final tallies stay readable until the next
    /// activation.
    pub fn conclude(&mut self) -> Conclusion {
        let conclusion = Conclusion {
            action_nonce: self.action_nonce,
            call_data_hash: self.call_data_hash,
            finish_reward: self.finish_reward,
            votes_for: self.votes_for,
            votes_against: self.votes_against,
        };
        self.call_data.clear();
        self.call_data_hash = Hash256::ZERO;
        self.finish_reward = 0;
        self.finished = true;
        conclusion
    }
}

struct Tallies {
    votes_for: u128,
    votes_against: u128,
}

impl Tallies {
    fn get(&self, direction: VoteDirection) -> u128 {
        match direction {
            VoteDirection::For => self.votes_for,
            VoteDirection::Against => self.votes_against,
        }
    }

    /// `None` when the tally already holds `after`.
    fn set(&mut self, direction: VoteDirection, after: u128) -> Option<TallyChange> {
        let slot = match direction {
            VoteDirection::For => &mut self.votes_for,
            VoteDirection::Against => &mut self.votes_against,
        };
        let before = std::mem::replace(slot, after);
        (before != after).then_some(TallyChange {
            direction,
            before,
            after,
        })
    }
}
