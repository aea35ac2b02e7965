//! Positions into the issue list and an issue's solutions.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SaveItError};

/// A list position: zero-based inside the crate, one-based whenever it is
/// shown to or read from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    #[must_use]
    pub const fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    /// Returns `None` for 0, which has no one-based meaning.
    #[must_use]
    pub const fn from_one_based(index: usize) -> Option<Self> {
        match index.checked_sub(1) {
            Some(zero) => Some(Self(zero)),
            None => None,
        }
    }

    #[must_use]
    pub const fn zero_based(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

impl FromStr for Index {
    type Err = SaveItError;

    /// Parses the one-based form users type.
    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_one_based)
            .ok_or_else(|| SaveItError::validation("index", "must be a positive integer"))
    }
}
