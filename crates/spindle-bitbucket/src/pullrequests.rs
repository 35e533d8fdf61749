//! Pull request endpoints.

use spindle_core::{NewProposal, Proposal, RepositoryIdentity};

use crate::BitbucketClient;
use crate::error::BitbucketError;
use crate::http::check_response;
use crate::model::{ApiPullRequest, CreatePullRequest};

impl BitbucketClient {
    /// Fetch pull request `id` of `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError::NotFound`] when the pull request does not
    /// exist.
    pub async fn get_pull_request(
        &self,
        repo: &RepositoryIdentity,
        id: u64,
    ) -> Result<Proposal, BitbucketError> {
        let url = format!("{}/pullrequests/{id}", self.repository_url(repo));
        let what = format!("pull request #{id} in {repo}");
        let api: ApiPullRequest = self.get_json(&url, &what).await?;
        Proposal::try_from(api)
    }

    /// File a new pull request against `repo`.
    ///
    /// An empty title is rejected before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError::Rejected`] for an empty title or when the
    /// API refuses the payload.
    pub async fn create_pull_request(
        &self,
        repo: &RepositoryIdentity,
        request: &NewProposal,
    ) -> Result<Proposal, BitbucketError> {
        if request.title.trim().is_empty() {
            return Err(BitbucketError::Rejected(
                "pull request title must not be empty".into(),
            ));
        }
        let url = format!("{}/pullrequests", self.repository_url(repo));
        tracing::debug!(%url, source = %request.source_repository, "POST");
        let resp = self
            .post(&url)
            .json(&CreatePullRequest::from(request))
            .send()
            .await?;
        let resp = check_response(resp, &format!("repository {repo}")).await?;
        let api: ApiPullRequest = resp.json().await?;
        Proposal::try_from(api)
    }
}
