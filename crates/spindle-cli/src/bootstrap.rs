use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use spindle_bitbucket::BitbucketClient;
use spindle_config::{PromptPolicy, SpindleConfig};
use spindle_core::VcsGateway;
use spindle_engine::{AcceptDefaults, AlwaysNo, AlwaysYes, Confirm, RepositoryContext, TerminalConfirm};
use spindle_git::GitGateway;

use crate::cli::GlobalFlags;

/// Everything a command needs about the working copy it runs in.
pub struct Session {
    pub config: SpindleConfig,
    pub git: GitGateway,
    pub ctx: RepositoryContext,
}

/// Discover the working copy, load its configuration and resolve its remotes.
pub fn open_session(flags: &GlobalFlags) -> anyhow::Result<Session> {
    let start = match &flags.repo {
        Some(repo) => PathBuf::from(repo),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let git = GitGateway::discover(&start)
        .with_context(|| format!("not a git repository: {}", start.display()))?;

    let config = SpindleConfig::load_with_dotenv(Some(git.root()))
        .context("failed to load configuration")?;

    let ctx = RepositoryContext::discover(
        &git,
        &config.remotes.origin,
        &config.remotes.upstream,
        &config.bitbucket.hosts,
    )?;
    tracing::debug!(root = %ctx.root.display(), origin = %ctx.origin, "session opened");

    Ok(Session { config, git, ctx })
}

/// Authenticated API client; fails early when credentials are missing.
pub fn host_client(config: &SpindleConfig) -> anyhow::Result<BitbucketClient> {
    config.bitbucket.require_configured()?;
    BitbucketClient::new(&config.bitbucket).context("failed to build Bitbucket client")
}

/// Whether a person is at the other end of stdin.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Pick the confirmation policy: command-line flags win over configuration,
/// and interactive prompting falls back to defaults without a terminal.
pub fn confirmer(flags: &GlobalFlags, policy: PromptPolicy, interactive: bool) -> Box<dyn Confirm> {
    if flags.yes {
        return Box::new(AlwaysYes);
    }
    if flags.no {
        return Box::new(AlwaysNo);
    }
    match policy {
        PromptPolicy::Interactive if interactive => Box::new(TerminalConfirm::terminal()),
        PromptPolicy::Interactive | PromptPolicy::AcceptDefaults => Box::new(AcceptDefaults),
        PromptPolicy::Yes => Box::new(AlwaysYes),
        PromptPolicy::No => Box::new(AlwaysNo),
    }
}
