use crate::error::GovernorError;
use crate::event::GovernorEvent;
use crate::msg::GovernorMsg;
use crate::proposal::ActionState;
use crate::vote::VoteDirection;
use crispy_chain::{decode_input, encode, Chain, ChainError, Contract, Env, Revert};
use crispy_ledger::LedgerMsg;
use crispy_types::{Address, GovernorParams, TaxSplit, SCALE};
use std::any::Any;

/// Mediates one action at a time between ledger holders and the treasury.
///
/// The governor must own the treasury for passed actions to execute; it
/// never checks this itself.
#[derive(Clone, Debug)]
pub struct GovernorContract {
    ledger: Address,
    treasury: Address,
    params: GovernorParams,
    split: TaxSplit,
    action: ActionState,
}

impl GovernorContract {
    pub fn new(
        ledger: Address,
        treasury: Address,
        params: GovernorParams,
    ) -> Result<Self, GovernorError> {
        if ledger.is_zero() || treasury.is_zero() {
            return Err(GovernorError::InvalidParams("zero ledger or treasury address"));
        }
        if !params.is_valid() {
            return Err(GovernorError::InvalidParams("rate above one"));
        }
        let split = params
            .tax_split()
            .ok_or(GovernorError::InvalidParams("activation tax overflows"))?;
        Ok(Self {
            ledger,
            treasury,
            params,
            split,
            action: ActionState::new(),
        })
    }

    pub fn deploy(
        chain: &mut Chain,
        deployer: Address,
        ledger: Address,
        treasury: Address,
        params: GovernorParams,
    ) -> Result<Address, ChainError> {
        chain.deploy(deployer, |_| {
            Self::new(ledger, treasury, params).map_err(Revert::from)
        })
    }

    pub fn ledger(&self) -> Address {
        self.ledger
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn params(&self) -> &GovernorParams {
        &self.params
    }

    pub fn tax_split(&self) -> TaxSplit {
        self.split
    }

    pub fn action(&self) -> &ActionState {
        &self.action
    }

    fn initiate_action(
        &mut self,
        env: &mut Env<'_>,
        call_data: Vec<u8>,
    ) -> Result<u64, GovernorError> {
        if !self.action.finished() {
            return Err(GovernorError::ActionInProgress);
        }
        let initiator = env.caller();
        let governor = env.address();
        let TaxSplit {
            tax, finish_reward, ..
        } = self.split;

        collect_tax(env, self.ledger, initiator, self.treasury, tax)?;
        collect_tax(env, self.ledger, initiator, governor, finish_reward)?;

        let activation = self.action.begin(
            call_data.clone(),
            finish_reward,
            env.now(),
            self.params.vote_period_secs,
        )?;
        tracing::info!(
            nonce = activation.action_nonce,
            %initiator,
            hash = %activation.call_data_hash,
            ends = %activation.voting_ends_on,
            tax,
            finish_reward,
            "action initiated"
        );
        env.emit(&GovernorEvent::ActionInitiated {
            call_data_hash: activation.call_data_hash,
            action_nonce: activation.action_nonce,
            activated_on: activation.activated_on,
            voting_ends_on: activation.voting_ends_on,
            call_data,
            initiator,
            tax,
            finish_reward,
        });
        Ok(activation.action_nonce)
    }

    fn vote(&mut self, env: &mut Env<'_>, direction: VoteDirection) -> Result<(), GovernorError> {
        if self.action.finished() {
            return Err(GovernorError::NoActiveAction);
        }
        let voter = env.caller();
        let weight: u128 = env
            .call_msg(self.ledger, 0, &LedgerMsg::BalanceOf { account: voter })
            .map_err(|source| GovernorError::WeightQueryFailed { source })?;

        let changes = self.action.cast(voter, direction, weight, env.now())?;
        tracing::debug!(%voter, %direction, weight, changes = changes.len(), "vote cast");
        for change in changes {
            env.emit(&GovernorEvent::VoteChanged {
                account: voter,
                call_data_hash: self.action.call_data_hash(),
                action_nonce: self.action.action_nonce(),
                vote: change.direction,
                vote_count_before: change.before,
                vote_count_after: change.after,
            });
        }
        Ok(())
    }

    /// Returns whether the action was executed.
    fn finish(&mut self, env: &mut Env<'_>) -> Result<bool, GovernorError> {
        let passed = self.action.outcome(env.now())?;
        if passed {
            env.call(self.treasury, 0, self.action.call_data())
                .map_err(|source| GovernorError::ExecutionFailed { source })?;
        }

        let finisher = env.caller();
        let conclusion = self.action.conclude();
        if conclusion.finish_reward > 0 {
            let payout = LedgerMsg::Transfer {
                to: finisher,
                amount: conclusion.finish_reward,
            };
            env.call(self.ledger, 0, &encode(&payout))
                .map_err(|source| GovernorError::RewardPayoutFailed { source })?;
        }

        tracing::info!(
            nonce = conclusion.action_nonce,
            executed = passed,
            votes_for = conclusion.votes_for,
            votes_against = conclusion.votes_against,
            %finisher,
            "action finished"
        );
        env.emit(&GovernorEvent::ActionFinished {
            call_data_hash: conclusion.call_data_hash,
            action_nonce: conclusion.action_nonce,
            executed: passed,
            finisher,
            reward: conclusion.finish_reward,
        });
        Ok(passed)
    }

    fn query(&self, msg: &GovernorMsg) -> Vec<u8> {
        let action = &self.action;
        match msg {
            GovernorMsg::ActionNonce => encode(&action.action_nonce()),
            GovernorMsg::CallData => encode(&action.call_data()),
            GovernorMsg::CallDataHash => encode(&action.call_data_hash()),
            GovernorMsg::Finished => encode(&action.finished()),
            GovernorMsg::FinishReward => encode(&action.finish_reward()),
            GovernorMsg::VoteCount { direction } => encode(&action.vote_count(*direction)),
            GovernorMsg::VoteOf { account } => encode(&action.vote_of(account)),
            GovernorMsg::ActivatedOn => encode(&action.activated_on()),
            GovernorMsg::VotingEndsOn => encode(&action.voting_ends_on()),
            GovernorMsg::ActivationThreshold => encode(&self.params.activation_threshold),
            GovernorMsg::ActivationTax => encode(&self.params.activation_tax),
            GovernorMsg::FinishRewardShare => encode(&self.params.finish_reward_share),
            GovernorMsg::VotePeriod => encode(&self.params.vote_period_secs),
            GovernorMsg::Scale => encode(&SCALE),
            GovernorMsg::Ledger => encode(&self.ledger),
            GovernorMsg::Treasury => encode(&self.treasury),
            GovernorMsg::InitiateAction { .. } | GovernorMsg::Vote { .. } | GovernorMsg::Finish => {
                Vec::new()
            }
        }
    }
}

fn collect_tax(
    env: &mut Env<'_>,
    ledger: Address,
    from: Address,
    to: Address,
    amount: u128,
) -> Result<(), GovernorError> {
    let pull = LedgerMsg::TransferFrom { from, to, amount };
    env.call(ledger, 0, &encode(&pull))
        .map(|_| ())
        .map_err(|source| GovernorError::TaxCollectionFailed { source })
}

impl Contract for GovernorContract {
    fn kind(&self) -> &'static str {
        "governor"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        match decode_input::<GovernorMsg>(input)? {
            GovernorMsg::InitiateAction { call_data } => {
                Ok(encode(&self.initiate_action(env, call_data)?))
            }
            GovernorMsg::Vote { direction } => {
                self.vote(env, direction)?;
                Ok(Vec::new())
            }
            GovernorMsg::Finish => Ok(encode(&self.finish(env)?)),
            query => Ok(self.query(&query)),
        }
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
