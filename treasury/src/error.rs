use crispy_chain::{CallError, Revert};
use crispy_types::Address;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreasuryError {
    #[error("Ownable: caller is not the owner")]
    NotOwner { caller: Address },

    #[error("new owner is the zero address")]
    ZeroOwner,

    #[error("forwarded call to {target} failed: {source}")]
    CallFailed {
        target: Address,
        #[source]
        source: CallError,
    },
}

impl TreasuryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotOwner { .. } => "treasury.not_owner",
            Self::ZeroOwner => "treasury.zero_owner",
            Self::CallFailed { .. } => "treasury.call_failed",
        }
    }
}

impl From<TreasuryError> for Revert {
    fn from(err: TreasuryError) -> Self {
        let revert = Revert::new(err.code(), err.to_string());
        match err {
            TreasuryError::CallFailed { source, .. } => revert.with_cause(source),
            _ => revert,
        }
    }
}
