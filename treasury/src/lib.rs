//! The governed treasury.
//!
//! Accepts native value and asset deposits from anyone. Its single
//! privileged operation, [`TreasuryMsg::CallDirect`], forwards value and an
//! opaque payload to any address on the owner's behalf; a failing callee
//! fails the whole call.

pub mod contract;
pub mod error;
pub mod event;
pub mod msg;

pub use contract::TreasuryContract;
pub use error::TreasuryError;
pub use event::TreasuryEvent;
pub use msg::TreasuryMsg;
