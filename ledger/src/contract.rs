//! Host adapter: decodes [`LedgerMsg`] and applies it to a [`TokenState`].

use crate::msg::LedgerMsg;
use crate::state::{TokenState, DECIMALS, HARD_CAP, NAME, SYMBOL};
use crispy_chain::{
    decode_input, encode, Chain, ChainError, Contract, DeployContext, Deposit, Env, Revert,
};
use crispy_types::Address;
use std::any::Any;

#[derive(Clone, Debug)]
pub struct LedgerContract {
    state: TokenState,
}

impl LedgerContract {
    /// The deployer becomes the owner; supply starts at zero.
    pub fn new(ctx: &DeployContext) -> Self {
        Self {
            state: TokenState::new(ctx.deployer),
        }
    }

    pub fn deploy(chain: &mut Chain, deployer: Address) -> Result<Address, ChainError> {
        chain.deploy(deployer, |ctx| Ok(Self::new(ctx)))
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    fn apply(&mut self, env: &mut Env<'_>, msg: LedgerMsg) -> Result<Vec<u8>, Revert> {
        let caller = env.caller();
        let now = env.now();
        let event = match msg {
            LedgerMsg::Transfer { to, amount } => self.state.transfer(caller, to, amount, now)?,
            LedgerMsg::SafeTransfer { to, amount } => {
                let event = self.state.transfer(caller, to, amount, now)?;
                env.emit(&event);
                let deposit = Deposit::Fungible {
                    asset: env.address(),
                    from: caller,
                    amount,
                };
                env.notify_deposit(to, deposit).map_err(|e| {
                    Revert::new("ledger.deposit_rejected", format!("{to} rejected the transfer"))
                        .with_cause(e)
                })?;
                return Ok(Vec::new());
            }
            LedgerMsg::TransferFrom { from, to, amount } => {
                self.state.transfer_from(caller, from, to, amount, now)?
            }
            LedgerMsg::Approve { spender, amount } => {
                self.state.approve(caller, spender, amount)?
            }
            LedgerMsg::IncreaseAllowance { spender, added } => {
                self.state.increase_allowance(caller, spender, added)?
            }
            LedgerMsg::DecreaseAllowance {
                spender,
                subtracted,
            } => self.state.decrease_allowance(caller, spender, subtracted)?,
            LedgerMsg::Mint { to, amount } => {
                let event = self.state.mint(caller, to, amount)?;
                tracing::debug!(%to, amount, supply = self.state.total_supply(), "minted");
                event
            }
            LedgerMsg::LockBalanceUntil { until } => {
                let event = self.state.lock_balance_until(caller, until, now)?;
                tracing::debug!(account = %caller, %until, "balance locked");
                event
            }
            LedgerMsg::TransferOwnership { new_owner } => {
                let event = self.state.transfer_ownership(caller, new_owner)?;
                tracing::info!(previous = %caller, %new_owner, "ledger ownership transferred");
                event
            }
            LedgerMsg::RenounceOwnership => {
                let event = self.state.renounce_ownership(caller)?;
                tracing::info!(previous = %caller, "ledger ownership renounced");
                event
            }
            query => return Ok(self.query(&query)),
        };
        env.emit(&event);
        Ok(Vec::new())
    }

    fn query(&self, msg: &LedgerMsg) -> Vec<u8> {
        match msg {
            LedgerMsg::BalanceOf { account } => encode(&self.state.balance_of(account)),
            LedgerMsg::TotalSupply => encode(&self.state.total_supply()),
            LedgerMsg::Allowance { owner, spender } => {
                encode(&self.state.allowance(owner, spender))
            }
            LedgerMsg::LockedUntil { account } => encode(&self.state.locked_until(account)),
            LedgerMsg::Owner => encode(&self.state.owner()),
            LedgerMsg::HardCap => encode(&HARD_CAP),
            LedgerMsg::Name => encode(&NAME),
            LedgerMsg::Symbol => encode(&SYMBOL),
            LedgerMsg::Decimals => encode(&DECIMALS),
            _ => Vec::new(),
        }
    }
}

impl Contract for LedgerContract {
    fn kind(&self) -> &'static str {
        "ledger"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        let msg: LedgerMsg = decode_input(input)?;
        self.apply(env, msg)
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

