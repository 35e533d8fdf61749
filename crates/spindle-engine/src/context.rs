use std::path::PathBuf;

use spindle_core::{RepositoryIdentity, VcsGateway};

use crate::EngineError;

/// The working copy an orchestration runs against, and the hosted
/// repositories its remotes point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    pub root: PathBuf,
    pub git_dir: PathBuf,
    /// Name of the remote for the user's own fork.
    pub origin_remote: String,
    /// Name of the remote for the parent repository.
    pub upstream_remote: String,
    pub origin: RepositoryIdentity,
    /// Present when the upstream remote exists and points at a known host.
    pub upstream: Option<RepositoryIdentity>,
}

impl RepositoryContext {
    /// Build the context from the gateway's configured remotes.
    ///
    /// Remote URLs on hosts outside `hosts` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingRemote`] when the origin remote is
    /// absent or does not point at one of `hosts`.
    pub fn discover<G: VcsGateway + ?Sized>(
        git: &G,
        origin_remote: &str,
        upstream_remote: &str,
        hosts: &[String],
    ) -> Result<Self, EngineError> {
        let origin_url = git.remote_url(origin_remote)?.ok_or_else(|| {
            EngineError::MissingRemote(format!("no remote named '{origin_remote}' is configured"))
        })?;
        let origin = RepositoryIdentity::from_remote_url(&origin_url, hosts).ok_or_else(|| {
            EngineError::MissingRemote(format!(
                "remote '{origin_remote}' ({origin_url}) is not hosted on {}",
                hosts.join(", ")
            ))
        })?;
        let upstream = git
            .remote_url(upstream_remote)?
            .and_then(|url| RepositoryIdentity::from_remote_url(&url, hosts));

        tracing::debug!(%origin, upstream = ?upstream, "repository context");
        Ok(Self {
            root: git.root().to_path_buf(),
            git_dir: git.git_dir().to_path_buf(),
            origin_remote: origin_remote.to_string(),
            upstream_remote: upstream_remote.to_string(),
            origin,
            upstream,
        })
    }

    /// Repository new proposals are filed against: upstream when known, origin otherwise.
    pub fn destination(&self) -> &RepositoryIdentity {
        self.upstream.as_ref().unwrap_or(&self.origin)
    }

    /// Local ref that tracks proposal `id`, namespaced under the remote it was filed on.
    pub fn proposal_ref(&self, prefer_parent: bool, id: u64) -> String {
        let remote = if prefer_parent {
            &self.upstream_remote
        } else {
            &self.origin_remote
        };
        format!("refs/remotes/{remote}/pull-requests/{id}")
    }
}
