//! Number of independent generations per round

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many generations run per request
///
/// Only 1 (no consensus) and 3 (majority vote) are supported.
///
/// # Example
///
/// ```
/// use mindat_query_domain::quorum::RepeatCount;
///
/// assert_eq!(RepeatCount::try_from(3).unwrap(), RepeatCount::Triple);
/// assert!(RepeatCount::try_from(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum RepeatCount {
    Single,
    #[default]
    Triple,
}

impl RepeatCount {
    pub fn get(self) -> usize {
        match self {
            RepeatCount::Single => 1,
            RepeatCount::Triple => 3,
        }
    }

    /// Whether results go through a majority vote
    pub fn uses_consensus(self) -> bool {
        matches!(self, RepeatCount::Triple)
    }
}

impl TryFrom<usize> for RepeatCount {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RepeatCount::Single),
            3 => Ok(RepeatCount::Triple),
            other => Err(DomainError::InvalidRepeatCount(other)),
        }
    }
}

impl From<RepeatCount> for usize {
    fn from(value: RepeatCount) -> Self {
        value.get()
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
