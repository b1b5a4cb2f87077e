//! Failure taxonomy of the execution host.
//!
//! - [`Revert`]: a callee rejected the call; carries a stable reason tag.
//! - [`BoundaryFault`]: the call never reached (or could not enter) the callee.
//! - [`CallError`]: either of the above, as seen by a caller.
//! - [`ChainError`]: failures of the host API (transactions, deployments, funding).

use crispy_types::Address;
use thiserror::Error;

/// A callee-reported failure.
///
/// `code` is a stable, dotted reason tag (`ledger.hard_cap_exceeded`); the
/// message is for humans. `cause` keeps the nested failure when a contract
/// reverts because something it called failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct Revert {
    pub code: &'static str,
    pub message: String,
    pub cause: Option<Box<CallError>>,
}

impl Revert {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: CallError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The innermost failure's reason tag.
    pub fn root_code(&self) -> &'static str {
        match &self.cause {
            Some(cause) => cause.root_code(),
            None => self.code,
        }
    }
}

/// The call could not be delivered to, or entered by, its target.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoundaryFault {
    #[error("{0} has no code but the call carries a payload")]
    NoCode(Address),

    #[error("{0} is already executing")]
    Reentrant(Address),

    #[error("call depth limit {0} reached")]
    DepthExceeded(usize),

    #[error("{account} holds {available} native units, {needed} required")]
    InsufficientValue {
        account: Address,
        needed: u128,
        available: u128,
    },

    #[error("native balance overflow for {0}")]
    ValueOverflow(Address),

    #[error("malformed return data: {0}")]
    MalformedReturn(String),
}

impl BoundaryFault {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCode(_) => "boundary.no_code",
            Self::Reentrant(_) => "boundary.reentrant",
            Self::DepthExceeded(_) => "boundary.depth_exceeded",
            Self::InsufficientValue { .. } => "boundary.insufficient_value",
            Self::ValueOverflow(_) => "boundary.value_overflow",
            Self::MalformedReturn(_) => "boundary.malformed_return",
        }
    }
}

/// Outcome of a failed call frame, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("reverted: {0}")]
    Reverted(Revert),

    #[error("boundary fault: {0}")]
    Boundary(BoundaryFault),
}

impl CallError {
    /// Reason tag of this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reverted(revert) => revert.code,
            Self::Boundary(fault) => fault.code(),
        }
    }

    /// Reason tag of the innermost failure.
    pub fn root_code(&self) -> &'static str {
        match self {
            Self::Reverted(revert) => revert.root_code(),
            Self::Boundary(fault) => fault.code(),
        }
    }
}

impl From<BoundaryFault> for CallError {
    fn from(fault: BoundaryFault) -> Self {
        Self::Boundary(fault)
    }
}

impl From<Revert> for CallError {
    fn from(revert: Revert) -> Self {
        Self::Reverted(revert)
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transaction {nonce} from {from} failed: {source}")]
    Transaction {
        from: Address,
        nonce: u64,
        #[source]
        source: CallError,
    },

    #[error("constructor reverted: {0}")]
    Constructor(Revert),

    #[error("a contract already exists at {0}")]
    AddressCollision(Address),

    #[error("nonce overflow for {0}")]
    NonceOverflow(Address),

    #[error("native balance overflow for {0}")]
    BalanceOverflow(Address),
}

impl ChainError {
    /// The call failure behind a failed transaction.
    pub fn call_error(&self) -> Option<&CallError> {
        match self {
            Self::Transaction { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Reason tag of the outermost failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transaction { source, .. } => source.code(),
            Self::Constructor(revert) => revert.code,
            Self::AddressCollision(_) => "chain.address_collision",
            Self::NonceOverflow(_) => "chain.nonce_overflow",
            Self::BalanceOverflow(_) => "chain.balance_overflow",
        }
    }

    /// Reason tag of the innermost failure.
    pub fn root_code(&self) -> &'static str {
        match self {
            Self::Transaction { source, .. } => source.root_code(),
            Self::Constructor(revert) => revert.root_code(),
            other => other.code(),
        }
    }
}
