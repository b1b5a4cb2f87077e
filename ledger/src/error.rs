use crispy_chain::Revert;
use crispy_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Ownable: caller is not the owner")]
    NotOwner { caller: Address },

    #[error("mint of {requested} exceeds hard cap: supply {supply}, cap {cap}")]
    HardCapExceeded {
        supply: u128,
        requested: u128,
        cap: u128,
    },

    #[error("insufficient balance for {account}: need {needed}, available {available}")]
    InsufficientBalance {
        account: Address,
        needed: u128,
        available: u128,
    },

    #[error("insufficient allowance from {owner} to {spender}: need {needed}, available {available}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        needed: u128,
        available: u128,
    },

    #[error("decreased allowance below zero: current {current}, decrease {decrease}")]
    AllowanceBelowZero { current: u128, decrease: u128 },

    #[error("balance of {account} is locked until {until}")]
    SenderLocked { account: Address, until: Timestamp },

    #[error("lock time {until} is not after now ({now})")]
    LockNotInFuture { until: Timestamp, now: Timestamp },

    #[error("cannot shorten active lock from {current} to {requested}")]
    LockDecrease {
        current: Timestamp,
        requested: Timestamp,
    },

    #[error("the zero address is not a valid {0}")]
    ZeroAddress(&'static str),

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,
}

impl LedgerError {
    /// Stable reason tag.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotOwner { .. } => "ledger.not_owner",
            Self::HardCapExceeded { .. } => "ledger.hard_cap_exceeded",
            Self::InsufficientBalance { .. } => "ledger.insufficient_balance",
            Self::InsufficientAllowance { .. } => "ledger.insufficient_allowance",
            Self::AllowanceBelowZero { .. } => "ledger.allowance_below_zero",
            Self::SenderLocked { .. } => "ledger.sender_locked",
            Self::LockNotInFuture { .. } => "ledger.lock_not_in_future",
            Self::LockDecrease { .. } => "ledger.lock_decrease",
            Self::ZeroAddress(_) => "ledger.zero_address",
            Self::Overflow => "ledger.overflow",
        }
    }
}

impl From<LedgerError> for Revert {
    fn from(err: LedgerError) -> Self {
        Revert::new(err.code(), err.to_string())
    }
}
