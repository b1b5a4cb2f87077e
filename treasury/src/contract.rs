use crate::error::TreasuryError;
use crate::event::TreasuryEvent;
use crate::msg::TreasuryMsg;
use crispy_chain::{
    decode_input, encode, Chain, ChainError, Contract, DeployContext, Deposit, Env, Revert,
};
use crispy_crypto::hash_payload;
use crispy_types::Address;
use std::any::Any;

/// The vault. Holds native value at its own address and whatever assets
/// other contracts record for it; keeps no ledger of its own besides `owner`.
#[derive(Clone, Debug)]
pub struct TreasuryContract {
    owner: Address,
}

impl TreasuryContract {
    pub fn new(ctx: &DeployContext) -> Self {
        Self {
            owner: ctx.deployer,
        }
    }

    pub fn deploy(chain: &mut Chain, deployer: Address) -> Result<Address, ChainError> {
        chain.deploy(deployer, |ctx| Ok(Self::new(ctx)))
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), TreasuryError> {
        if caller != self.owner {
            return Err(TreasuryError::NotOwner { caller });
        }
        Ok(())
    }

    fn call_direct(
        &mut self,
        env: &mut Env<'_>,
        target: Address,
        value: u128,
        payload: &[u8],
    ) -> Result<Vec<u8>, TreasuryError> {
        self.ensure_owner(env.caller())?;
        let data = env
            .call(target, value, payload)
            .map_err(|source| TreasuryError::CallFailed { target, source })?;

        tracing::debug!(%target, value, payload_len = payload.len(), "treasury call executed");
        if value > 0 {
            env.emit(&TreasuryEvent::NativeSent { to: target, amount: value });
        }
        env.emit(&TreasuryEvent::CallExecuted {
            target,
            value,
            payload_hash: hash_payload(payload),
        });
        Ok(data)
    }

    fn set_owner(&mut self, env: &mut Env<'_>, new_owner: Address) {
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(previous = %previous_owner, %new_owner, "treasury ownership transferred");
        env.emit(&TreasuryEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }
}

impl Contract for TreasuryContract {
    fn kind(&self) -> &'static str {
        "treasury"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        match decode_input::<TreasuryMsg>(input)? {
            TreasuryMsg::CallDirect {
                target,
                value,
                payload,
            } => Ok(self.call_direct(env, target, value, &payload)?),
            TreasuryMsg::TransferOwnership { new_owner } => {
                self.ensure_owner(env.caller())?;
                if new_owner.is_zero() {
                    return Err(TreasuryError::ZeroOwner.into());
                }
                self.set_owner(env, new_owner);
                Ok(Vec::new())
            }
            TreasuryMsg::RenounceOwnership => {
                self.ensure_owner(env.caller())?;
                self.set_owner(env, Address::ZERO);
                Ok(Vec::new())
            }
            TreasuryMsg::Owner => Ok(encode(&self.owner)),
        }
    }

    /// Every deposit is accepted.
    fn receive(&mut self, env: &mut Env<'_>, deposit: &Deposit) -> Result<(), Revert> {
        let sender = env.caller();
        tracing::debug!(%sender, kind = deposit.kind(), "treasury deposit");
        env.emit(&TreasuryEvent::DepositReceived {
            sender,
            deposit: deposit.clone(),
        });
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
