//! Repository, fork and branch endpoints.

use std::collections::BTreeMap;

use spindle_core::{CommitId, RepositoryIdentity, RepositoryInfo};

use crate::BitbucketClient;
use crate::error::BitbucketError;
use crate::model::{ApiBranch, ApiRepository};

impl BitbucketClient {
    /// Fetch one repository.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError::NotFound`] if the repository does not exist
    /// or is not visible to the authenticated user.
    pub async fn get_repository(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<RepositoryInfo, BitbucketError> {
        let what = format!("repository {repo}");
        let api: ApiRepository = self.get_json(&self.repository_url(repo), &what).await?;
        RepositoryInfo::try_from(api)
    }

    /// List every fork of `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError`] on transport, status or parse failures.
    pub async fn list_forks(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<Vec<RepositoryInfo>, BitbucketError> {
        let url = format!("{}/forks", self.repository_url(repo));
        let forks: Vec<ApiRepository> = self.get_all(&url, &format!("forks of {repo}")).await?;
        forks.into_iter().map(RepositoryInfo::try_from).collect()
    }

    /// Map every branch of `repo` to its head commit.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError`] on transport, status or parse failures.
    pub async fn list_branches(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<BTreeMap<String, CommitId>, BitbucketError> {
        let url = format!("{}/refs/branches", self.repository_url(repo));
        let branches: Vec<ApiBranch> =
            self.get_all(&url, &format!("branches of {repo}")).await?;
        let mut heads = BTreeMap::new();
        for branch in branches {
            let head = branch.head()?;
            heads.insert(branch.name, head);
        }
        tracing::debug!(%repo, count = heads.len(), "listed branches");
        Ok(heads)
    }
}
