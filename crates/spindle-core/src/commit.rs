//! Commit identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest abbreviation git itself accepts for an object id.
const MIN_HEX_LEN: usize = 4;
/// SHA-256 object ids are 64 hex digits; SHA-1 ids are 40.
const MAX_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid commit id '{value}': {reason}")]
pub struct CommitIdError {
    pub value: String,
    pub reason: &'static str,
}

/// Hex digest naming a commit.
///
/// Two ids are only ever related through ancestry queries against a repository.
/// The single exception is [`CommitId::matches_abbreviated`], used to compare a
/// hosting service's (possibly shortened) proposal commit against a local id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven hex digits, for display.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }

    /// True when this (full) id starts with `abbreviated`.
    #[must_use]
    pub fn matches_abbreviated(&self, abbreviated: &CommitId) -> bool {
        self.0.starts_with(abbreviated.as_str())
    }
}

impl FromStr for CommitId {
    type Err = CommitIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let error = |reason| CommitIdError {
            value: value.to_string(),
            reason,
        };
        if trimmed.len() < MIN_HEX_LEN {
            return Err(error("too short"));
        }
        if trimmed.len() > MAX_HEX_LEN {
            return Err(error("too long"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error("not a hex digest"));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for CommitId {
    type Error = CommitIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommitId> for String {
    fn from(value: CommitId) -> Self {
        value.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
