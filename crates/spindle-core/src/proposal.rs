//! Change proposals ("pull requests") as retrieved from a hosting service.
//!
//! A [`Proposal`] is an immutable snapshot: it is fetched once per command and
//! never mutated locally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commit::CommitId;
use crate::repository::{RepositoryIdentity, UserIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProposalState {
    Open,
    Merged,
    Declined,
}

impl ProposalState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSource {
    pub repository: RepositoryIdentity,
    pub branch: String,
    /// Possibly abbreviated by the hosting service.
    pub commit: CommitId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDestination {
    pub repository: RepositoryIdentity,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub author: UserIdentity,
    pub state: ProposalState,
    pub source: ProposalSource,
    pub destination: ProposalDestination,
    /// Who merged or declined the proposal, when the service reports it.
    pub closed_by: Option<UserIdentity>,
    /// Reason given when the proposal was declined.
    pub reason: Option<String>,
    pub html_url: Option<String>,
}

/// Request body for filing a new proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProposal {
    pub source_repository: RepositoryIdentity,
    pub source_branch: String,
    pub destination_branch: String,
    pub title: String,
    pub body: String,
}
