pub mod add_remote;
pub mod apply_pr;
pub mod pull_request;

use spindle_engine::ExitOutcome;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<ExitOutcome> {
    match command {
        Commands::ApplyPr(args) => apply_pr::handle(&args, flags).await,
        Commands::PullRequest(args) => pull_request::handle(&args, flags).await,
        Commands::AddRemote(args) => add_remote::handle(&args, flags).await,
    }
}
