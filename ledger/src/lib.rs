//! The governed fungible ledger.
//!
//! A capped token (`HARD_CAP`), minted only by its owner, with a per-account
//! time lock on outbound transfers. [`TokenState`] holds the accounting;
//! [`LedgerContract`] exposes it on a [`crispy_chain::Chain`].

pub mod contract;
pub mod error;
pub mod event;
pub mod msg;
pub mod state;

pub use contract::LedgerContract;
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use msg::LedgerMsg;
pub use state::{TokenState, DECIMALS, HARD_CAP, NAME, SYMBOL, UNLIMITED_ALLOWANCE};
