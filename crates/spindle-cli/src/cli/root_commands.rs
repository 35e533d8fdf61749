use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};

/// Commands understood by `git-bucket`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a pull request and merge it into the current branch.
    ApplyPr(ApplyPrArgs),

    /// Push a branch and open a pull request for it.
    PullRequest(PullRequestArgs),

    /// Add another user's fork as a remote and fetch it.
    AddRemote(AddRemoteArgs),
}

#[derive(Debug, Args)]
pub struct ApplyPrArgs {
    /// Pull request number.
    pub id: u64,

    /// Look the pull request up on the parent repository instead of origin.
    #[arg(long)]
    pub parent: bool,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("message_source").multiple(false)))]
pub struct PullRequestArgs {
    /// Branches as yours:theirs; either side may be left out.
    pub branches: Option<String>,

    /// Use this text as the pull request message.
    #[arg(short, long, group = "message_source")]
    pub message: Option<String>,

    /// Read the message from a file.
    #[arg(short = 'F', long, group = "message_source")]
    pub file: Option<PathBuf>,

    /// Start the editor from a template that must be changed.
    #[arg(short, long, group = "message_source")]
    pub template: Option<PathBuf>,

    /// Reuse the subject and body of a commit.
    #[arg(short = 'C', long, value_name = "COMMIT", group = "message_source")]
    pub reuse_message: Option<String>,

    /// Always open the editor before submitting.
    #[arg(short, long)]
    pub edit: bool,
}

#[derive(Debug, Args)]
pub struct AddRemoteArgs {
    /// A username whose fork to find, or owner/slug.
    pub target: String,

    /// Remote name; defaults to the owner's username.
    pub name: Option<String>,

    /// Use the SSH clone URL.
    #[arg(long, conflicts_with = "https")]
    pub ssh: bool,

    /// Use the HTTPS clone URL.
    #[arg(long)]
    pub https: bool,
}
