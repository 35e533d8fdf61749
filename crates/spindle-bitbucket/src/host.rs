use std::collections::BTreeMap;

use spindle_core::{
    CommitId, HostError, NewProposal, Proposal, ProposalHost, RepositoryIdentity, RepositoryInfo,
};

use crate::BitbucketClient;

impl ProposalHost for BitbucketClient {
    async fn repository(&self, repo: &RepositoryIdentity) -> Result<RepositoryInfo, HostError> {
        Ok(self.get_repository(repo).await?)
    }

    async fn forks(&self, repo: &RepositoryIdentity) -> Result<Vec<RepositoryInfo>, HostError> {
        Ok(self.list_forks(repo).await?)
    }

    async fn proposal(&self, repo: &RepositoryIdentity, id: u64) -> Result<Proposal, HostError> {
        Ok(self.get_pull_request(repo, id).await?)
    }

    async fn branches(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<BTreeMap<String, CommitId>, HostError> {
        Ok(self.list_branches(repo).await?)
    }

    async fn create_proposal(
        &self,
        repo: &RepositoryIdentity,
        request: &NewProposal,
    ) -> Result<Proposal, HostError> {
        Ok(self.create_pull_request(repo, request).await?)
    }
}
