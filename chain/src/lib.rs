//! Execution host for Crispy contracts.
//!
//! Every state transition is a transaction: totally ordered, executed at a
//! single timestamp, and all-or-nothing. A transaction is a tree of call
//! frames; each frame checkpoints world state on entry and restores it if
//! the callee fails, so a failure never leaves partial effects behind.
//!
//! Contracts are trait objects ([`Contract`]) addressed by [`Address`];
//! payloads are bincode-encoded message enums owned by each contract crate.
//!
//! [`Address`]: crispy_types::Address

pub mod chain;
pub mod codec;
pub mod contract;
pub mod env;
pub mod error;
pub mod event;
mod host;
pub mod receipt;

pub use chain::{AccountInfo, Chain, DEFAULT_MAX_CALL_DEPTH};
pub use codec::{decode_input, encode};
pub use contract::{Contract, DeployContext, Deposit};
pub use env::Env;
pub use error::{BoundaryFault, CallError, ChainError, Revert};
pub use event::{ContractEvent, EventRecord};
pub use receipt::Receipt;
