//! The proposal repository client contract.
//!
//! One adapter exists per hosting backend. Calls are awaited strictly one at a
//! time by the engine; nothing fans out.

use std::collections::BTreeMap;

use crate::commit::CommitId;
use crate::errors::HostError;
use crate::proposal::{NewProposal, Proposal};
use crate::repository::{RepositoryIdentity, RepositoryInfo};

#[allow(async_fn_in_trait)]
pub trait ProposalHost {
    async fn repository(&self, repo: &RepositoryIdentity) -> Result<RepositoryInfo, HostError>;

    async fn forks(&self, repo: &RepositoryIdentity) -> Result<Vec<RepositoryInfo>, HostError>;

    async fn proposal(&self, repo: &RepositoryIdentity, id: u64) -> Result<Proposal, HostError>;

    /// Branch name → head commit.
    async fn branches(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<BTreeMap<String, CommitId>, HostError>;

    /// File a new proposal against `repo`. An empty title is a validation error.
    async fn create_proposal(
        &self,
        repo: &RepositoryIdentity,
        request: &NewProposal,
    ) -> Result<Proposal, HostError>;
}
