//! The contract interface the host dispatches to.

use crate::env::Env;
use crate::error::Revert;
use crispy_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// An asset arriving at an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deposit {
    /// Native value sent with an empty payload.
    Native { amount: u128 },
    /// A fungible-token transfer the sender chose to announce.
    Fungible {
        asset: Address,
        from: Address,
        amount: u128,
    },
    /// A non-fungible token moved by a safe transfer.
    NonFungible {
        asset: Address,
        from: Address,
        token_id: u128,
    },
    /// A quantity of a multi-token id moved by a safe transfer.
    MultiToken {
        asset: Address,
        from: Address,
        token_id: u128,
        amount: u128,
    },
}

impl Deposit {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native { .. } => "native value",
            Self::Fungible { .. } => "fungible tokens",
            Self::NonFungible { .. } => "non-fungible tokens",
            Self::MultiToken { .. } => "multi-tokens",
        }
    }
}

/// Context handed to a constructor.
#[derive(Clone, Copy, Debug)]
pub struct DeployContext {
    /// The account deploying the contract (its initial owner, where relevant).
    pub deployer: Address,
    /// The address the contract will live at.
    pub address: Address,
    pub now: Timestamp,
}

/// A deployed contract.
///
/// `execute` receives non-empty payloads; `receive` is the deposit hook for
/// native value sent with an empty payload and for safe-transferred assets.
/// Any `Err` rolls back everything the frame did.
pub trait Contract: Any {
    /// Short name used in logs and error messages.
    fn kind(&self) -> &'static str;

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert>;

    /// Reject deposits unless the contract opts in.
    fn receive(&mut self, env: &mut Env<'_>, deposit: &Deposit) -> Result<(), Revert> {
        let _ = env;
        Err(Revert::new(
            "contract.deposit_rejected",
            format!("{} does not accept {}", self.kind(), deposit.kind()),
        ))
    }

    fn clone_box(&self) -> Box<dyn Contract>;

    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Contract> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
