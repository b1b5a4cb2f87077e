use crate::error::GovernorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tally a vote counts toward. Serialized as the byte `1` (for) or
/// `2` (against); any other byte fails to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum VoteDirection {
    For = 1,
    Against = 2,
}

impl VoteDirection {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for VoteDirection {
    type Error = GovernorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::For),
            2 => Ok(Self::Against),
            other => Err(GovernorError::UnknownDirection(other)),
        }
    }
}

impl From<VoteDirection> for u8 {
    fn from(direction: VoteDirection) -> Self {
        direction.as_u8()
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::For => write!(f, "for"),
            Self::Against => write!(f, "against"),
        }
    }
}

/// What one account currently contributes to the open action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The action the vote was cast on; records of older actions are stale.
    pub action_nonce: u64,
    pub direction: VoteDirection,
    pub weight: u128,
}

/// One tally mutation caused by a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TallyChange {
    pub direction: VoteDirection,
    pub before: u128,
    pub after: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_map_to_directions() {
        assert_eq!(VoteDirection::try_from(1), Ok(VoteDirection::For));
        assert_eq!(VoteDirection::try_from(2), Ok(VoteDirection::Against));
        assert_eq!(u8::from(VoteDirection::Against), 2);
    }

    #[test]
    fn unknown_byte_is_rejected() {
        assert_eq!(
            VoteDirection::try_from(0),
            Err(GovernorError::UnknownDirection(0))
        );
        let err = bincode::deserialize::<VoteDirection>(&[7]).unwrap_err();
        assert!(err.to_string().contains("unknown vote direction 7"));
    }
}
