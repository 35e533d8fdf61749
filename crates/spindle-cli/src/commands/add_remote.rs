use spindle_core::CloneProtocol;
use spindle_engine::{AddRemoteRequest, ExitOutcome, Flow, add_fork_remote};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddRemoteArgs;
use crate::output;

/// Handle `git-bucket add-remote`.
pub async fn handle(args: &AddRemoteArgs, flags: &GlobalFlags) -> anyhow::Result<ExitOutcome> {
    let session = bootstrap::open_session(flags)?;
    let host = bootstrap::host_client(&session.config)?;

    let request = AddRemoteRequest {
        target: args.target.clone(),
        name: args.name.clone(),
        protocol: protocol(args, session.config.general.clone_protocol),
    };
    let result = add_fork_remote(
        &session.ctx,
        &session.git,
        &host,
        &session.config.bitbucket.user,
        &request,
    )
    .await;

    if let Ok(added) = &result {
        let text = format!("Added remote {} ({})", added.name, added.url);
        output::output(added, flags.format, &text)?;
    }
    Ok(ExitOutcome::from(result.map(Flow::Completed)))
}

/// Command-line protocol flags win over the configured preference.
const fn protocol(args: &AddRemoteArgs, configured: CloneProtocol) -> CloneProtocol {
    if args.ssh {
        CloneProtocol::Ssh
    } else if args.https {
        CloneProtocol::Https
    } else {
        configured
    }
}
