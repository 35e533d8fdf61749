//! # spindle-bitbucket
//!
//! Bitbucket Cloud REST API 2.0 client implementing
//! [`spindle_core::ProposalHost`].
//!
//! Requests authenticate with HTTP basic auth (username + app password).
//! Listings follow the `next` link until the last page.

mod error;
mod host;
mod http;
mod model;
mod pullrequests;
mod repositories;

pub use error::BitbucketError;

use serde::de::DeserializeOwned;
use spindle_config::BitbucketConfig;
use spindle_core::RepositoryIdentity;

use crate::http::check_response;
use crate::model::Page;

/// Page size requested for listings; the API maximum is 100.
const PAGE_LEN: u32 = 100;

/// HTTP client for one Bitbucket account.
pub struct BitbucketClient {
    http: reqwest::Client,
    api_root: String,
    user: String,
    app_password: String,
}

impl BitbucketClient {
    /// Build a client from the `[bitbucket]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`BitbucketError::Http`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(config: &BitbucketConfig) -> Result<Self, BitbucketError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("git-spindle/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_root: config.api_root().to_string(),
            user: config.user.clone(),
            app_password: config.app_password.clone(),
        })
    }

    /// Login name the client authenticates as.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    fn repository_url(&self, repo: &RepositoryIdentity) -> String {
        format!(
            "{}/repositories/{}/{}",
            self.api_root,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.slug)
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.user, Some(&self.app_password))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .basic_auth(&self.user, Some(&self.app_password))
    }

    /// GET a single JSON object.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, BitbucketError> {
        tracing::debug!(url, "GET");
        let resp = check_response(self.get(url).send().await?, what).await?;
        Ok(resp.json().await?)
    }

    /// GET every page of a listing, starting at `url`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Vec<T>, BitbucketError> {
        let mut values = Vec::new();
        let mut next = Some(format!("{url}?pagelen={PAGE_LEN}"));
        while let Some(page_url) = next {
            let page: Page<T> = self.get_json(&page_url, what).await?;
            values.extend(page.values);
            next = page.next;
        }
        Ok(values)
    }
}
