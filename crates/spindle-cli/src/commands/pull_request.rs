use spindle_core::Proposal;
use spindle_engine::{
    ExitOutcome, Flow, KeepMessage, MessageEditor, MessageSource, SubmitRequest, submit_proposal,
};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::PullRequestArgs;
use crate::output;
use crate::prompt::GitEditor;

/// Handle `git-bucket pull-request`.
pub async fn handle(args: &PullRequestArgs, flags: &GlobalFlags) -> anyhow::Result<ExitOutcome> {
    let session = bootstrap::open_session(flags)?;
    let host = bootstrap::host_client(&session.config)?;
    let interactive = bootstrap::is_interactive();
    let mut confirm = bootstrap::confirmer(flags, session.config.general.prompt, interactive);

    let mut editor: Box<dyn MessageEditor> = if interactive {
        Box::new(GitEditor::new(
            session.ctx.root.clone(),
            session.ctx.git_dir.clone(),
        ))
    } else {
        Box::new(KeepMessage)
    };

    let request = submit_request(args, session.config.general.edit && interactive);
    let result = submit_proposal(
        &session.ctx,
        &session.git,
        &host,
        confirm.as_mut(),
        editor.as_mut(),
        &request,
    )
    .await;

    if let Ok(Flow::Completed(proposal)) = &result {
        output::output(proposal, flags.format, &summary(proposal))?;
    }
    Ok(ExitOutcome::from(result))
}

fn submit_request(args: &PullRequestArgs, edit_synthesized: bool) -> SubmitRequest {
    let message = if let Some(text) = &args.message {
        MessageSource::Text(text.clone())
    } else if let Some(path) = &args.file {
        MessageSource::File(path.clone())
    } else if let Some(path) = &args.template {
        MessageSource::Template(path.clone())
    } else if let Some(commit) = &args.reuse_message {
        MessageSource::Reuse(commit.clone())
    } else {
        MessageSource::Synthesize
    };

    SubmitRequest {
        branches: args.branches.clone(),
        message,
        force_edit: args.edit,
        edit_synthesized,
    }
}

fn summary(proposal: &Proposal) -> String {
    match &proposal.html_url {
        Some(url) => format!("Pull request #{} created at {url}", proposal.id),
        None => format!("Pull request #{} created", proposal.id),
    }
}
