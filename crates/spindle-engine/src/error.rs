use std::path::PathBuf;

use spindle_core::{CommitId, GitError, HostError};
use thiserror::Error;

/// Everything that can stop an apply, submit or add-remote run.
///
/// All variants are fatal for the current command. Declined confirmations
/// are not errors; they surface as [`crate::Flow::Aborted`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A named commit or branch cannot be found locally.
    #[error("cannot resolve '{0}' in the local repository")]
    UnresolvableRef(String),

    /// Every candidate ref was fetched without yielding the wanted commit.
    #[error("commit {commit} not found in any of {tried} candidate refs")]
    ProposalCommitNotFound { commit: CommitId, tried: usize },

    /// A remote branch, repository or proposal does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// No local remote matches the repository that is needed.
    #[error("{0}")]
    MissingRemote(String),

    #[error("{0}")]
    Validation(String),

    /// The replay stopped with conflicts; the working tree is left for the user.
    #[error("cherry-picking {from}..{to} stopped with conflicts; resolve them and continue with git cherry-pick --continue")]
    ConflictDuringReplay { from: CommitId, to: CommitId },

    /// Each commit claims to be an ancestor of the other yet they differ.
    #[error("{a} and {b} are mutual ancestors but not the same commit")]
    MergeBaseAmbiguous { a: CommitId, b: CommitId },

    /// The hosting service refused the proposal; the message was saved.
    #[error("{reason}\nyour pull request message was saved in {}", backup.display())]
    SubmissionFailed { backup: PathBuf, reason: String },

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Host(HostError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HostError> for EngineError {
    fn from(error: HostError) -> Self {
        match error {
            HostError::NotFound(what) => Self::NotFound(what),
            HostError::Validation(message) => Self::Validation(message),
            other => Self::Host(other),
        }
    }
}
