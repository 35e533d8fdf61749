//! The version-control gateway contract.
//!
//! Every method is synchronous and blocks until the underlying tool returns.
//! Implementations issue real subcommands; the engine's tests use an
//! in-memory commit graph instead.

use std::path::Path;

use crate::commit::CommitId;
use crate::errors::GitError;

/// Subject and body of one commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

impl CommitMessage {
    /// Subject and body joined the way git prints `%B`.
    #[must_use]
    pub fn full(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body)
        }
    }
}

pub trait VcsGateway {
    /// Working-copy root.
    fn root(&self) -> &Path;

    /// The repository's `.git` directory.
    fn git_dir(&self) -> &Path;

    /// Resolve a revision to the commit it names, `None` when it does not resolve.
    fn resolve(&self, rev: &str) -> Result<Option<CommitId>, GitError>;

    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor).
    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool, GitError>;

    /// Short name of the checked-out branch, `None` when HEAD is detached.
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// Point `name` at `target`, creating it when absent.
    fn update_ref(&self, name: &str, target: &CommitId) -> Result<(), GitError>;

    /// Fetch a single refspec from a URL.
    fn fetch(&self, url: &str, refspec: &str) -> Result<(), GitError>;

    /// Fetch a configured remote.
    fn fetch_remote(&self, remote: &str, with_tags: bool) -> Result<(), GitError>;

    /// Full names of every branch and tag advertised by `url`.
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>, GitError>;

    /// Push a branch; without `force`, non-fast-forward updates fail.
    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<(), GitError>;

    /// Fast-forward the current branch to `rev`, failing if that is not possible.
    fn merge_fast_forward_only(&self, rev: &str) -> Result<(), GitError>;

    /// Cherry-pick `from_exclusive..to_inclusive` onto the current checkout.
    ///
    /// Conflicts surface as [`GitError::Conflict`] with the tree left dirty.
    fn cherry_pick_range(
        &self,
        from_exclusive: &CommitId,
        to_inclusive: &CommitId,
    ) -> Result<(), GitError>;

    /// Commits reachable from `to_inclusive` but not `from_exclusive`, oldest first.
    fn commit_range(&self, from_exclusive: &str, to_inclusive: &str)
    -> Result<Vec<CommitId>, GitError>;

    fn commit_message(&self, rev: &str) -> Result<CommitMessage, GitError>;

    /// Upstream of a local branch as `remote/branch`, if one is configured.
    fn tracking_branch(&self, branch: &str) -> Result<Option<String>, GitError>;

    fn remotes(&self) -> Result<Vec<String>, GitError>;

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError>;

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError>;

    fn shortlog(&self, range: &str) -> Result<String, GitError>;

    fn diff_stat(&self, range: &str) -> Result<String, GitError>;
}
