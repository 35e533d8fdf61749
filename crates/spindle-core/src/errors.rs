//! Error types for the two leaf collaborators.
//!
//! Engine-level errors (the reconciliation taxonomy) live in `spindle-engine`;
//! adapter-specific errors are converted into these at the crate boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::commit::CommitIdError;

/// Errors raised by a [`crate::VcsGateway`].
#[derive(Debug, Error)]
pub enum GitError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// A git subcommand exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    /// A cherry-pick or merge stopped with conflicts; the working tree is left as is.
    #[error("`{command}` stopped with conflicts")]
    Conflict { command: String },

    #[error("gix error: {0}")]
    Gix(String),

    #[error(transparent)]
    CommitId(#[from] CommitIdError),
}

/// Errors raised by a [`crate::ProposalHost`].
#[derive(Debug, Error)]
pub enum HostError {
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected the request payload.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("parse error: {0}")]
    Parse(String),
}
