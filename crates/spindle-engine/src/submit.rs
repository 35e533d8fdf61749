//! Submitting a local branch as a new proposal.

use std::path::PathBuf;

use spindle_core::{NewProposal, Proposal, ProposalHost, RepositoryInfo, VcsGateway};

use crate::message::{guidance, strip_comments, synthesize, write_backup};
use crate::{Confirm, DraftMessage, EngineError, Flow, MessageEditor, RepositoryContext, sync_branch};

/// Where the proposal title and body come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageSource {
    /// Derived from the commits being proposed.
    #[default]
    Synthesize,
    Text(String),
    File(PathBuf),
    /// Must be edited; submitting it unchanged is refused.
    Template(PathBuf),
    /// Subject and body of an existing commit.
    Reuse(String),
}

#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    /// `yours:theirs`; either side may be left out.
    pub branches: Option<String>,
    pub message: MessageSource,
    /// Open the editor whatever the message source.
    pub force_edit: bool,
    /// Open the editor for synthesized messages.
    pub edit_synthesized: bool,
}

/// Split a `yours:theirs` spec; empty sides count as absent.
pub fn parse_branch_spec(spec: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(spec) = spec else {
        return (None, None);
    };
    let (source, destination) = spec.split_once(':').unwrap_or((spec, ""));
    let side = |s: &str| (!s.is_empty()).then(|| s.to_string());
    (side(source), side(destination))
}

/// Push the source branch to origin if needed and file it as a proposal
/// against origin's parent repository, or origin itself when it is not a fork.
///
/// # Errors
///
/// See [`EngineError`]. When the hosting service rejects the proposal the
/// composed message is saved and [`EngineError::SubmissionFailed`] names the file.
pub async fn submit_proposal<G, H, C, E>(
    ctx: &RepositoryContext,
    git: &G,
    host: &H,
    confirm: &mut C,
    editor: &mut E,
    request: &SubmitRequest,
) -> Result<Flow<Proposal>, EngineError>
where
    G: VcsGateway + ?Sized,
    H: ProposalHost + ?Sized,
    C: Confirm + ?Sized,
    E: MessageEditor + ?Sized,
{
    let (source, destination) = parse_branch_spec(request.branches.as_deref());
    let source = match source {
        Some(source) => source,
        None => git.current_branch()?.ok_or_else(|| {
            EngineError::Validation("HEAD is detached; name the branch to submit".into())
        })?,
    };

    let origin_info = host.repository(&ctx.origin).await?;
    let destination_info = match origin_info.parent.clone() {
        Some(parent) => host.repository(&parent).await?,
        None => origin_info,
    };
    let destination_repo = destination_info.identity.clone();
    let is_fork = destination_repo != ctx.origin;

    let destination = match destination {
        Some(destination) => destination,
        None => match tracked_destination(ctx, git, &source, is_fork)? {
            Some(destination) => destination,
            None => destination_info.main_branch.clone().ok_or_else(|| {
                EngineError::NotFound(format!("main branch of {destination_repo}"))
            })?,
        },
    };

    if !is_fork && source == destination {
        return Err(EngineError::Validation(format!(
            "cannot create a pull request from {source} into itself"
        )));
    }

    let local_head = git
        .resolve(&format!("refs/heads/{source}"))?
        .ok_or_else(|| EngineError::UnresolvableRef(source.clone()))?;
    let origin_branches = host.branches(&ctx.origin).await?;
    let synced = sync_branch(
        git,
        confirm,
        &ctx.origin_remote,
        &source,
        &local_head,
        origin_branches.get(&source),
    )?;
    if synced.is_aborted() {
        return Ok(Flow::Aborted);
    }

    let destination_branches = if destination_repo == ctx.origin {
        origin_branches
    } else {
        host.branches(&destination_repo).await?
    };
    if !destination_branches.contains_key(&destination) {
        return Err(EngineError::NotFound(format!(
            "branch {destination} in {destination_repo}"
        )));
    }

    let remote = destination_remote(git, &destination_info)?;
    git.fetch_remote(&remote, false)?;

    let destination_ref = format!("refs/remotes/{remote}/{destination}");
    let source_ref = format!("refs/heads/{source}");
    let commits = git.commit_range(&destination_ref, &source_ref)?;
    if commits.is_empty() {
        return Err(EngineError::Validation(format!(
            "no commits on {source} that are not on {remote}/{destination}"
        )));
    }

    let mut draft = match &request.message {
        MessageSource::Synthesize => synthesize(git, &source, &commits)?,
        MessageSource::Text(text) => DraftMessage::parse(text),
        MessageSource::File(path) | MessageSource::Template(path) => {
            DraftMessage::parse(&std::fs::read_to_string(path)?)
        }
        MessageSource::Reuse(rev) => {
            let message = git.commit_message(rev)?;
            DraftMessage {
                title: message.subject,
                body: message.body,
                accept_empty_body: false,
            }
        }
    };

    let edit = request.force_edit
        || matches!(request.message, MessageSource::Template(_))
        || (request.edit_synthesized && request.message == MessageSource::Synthesize);
    if edit {
        let shortlog = git.shortlog(&format!("{destination_ref}..{source_ref}"))?;
        let diff_stat = git.diff_stat(&format!("{destination_ref}...{source_ref}"))?;
        let text = format!(
            "{}\n{}",
            draft.text(),
            guidance(
                &format!("{}:{source}", ctx.origin.owner),
                &format!("{}:{destination}", destination_repo.owner),
                &shortlog,
                &diff_stat,
            )
        );
        let edited = strip_comments(&editor.edit(&text)?);
        if let MessageSource::Template(path) = &request.message {
            let template = strip_comments(&std::fs::read_to_string(path)?);
            if edited.trim() == template.trim() {
                return Err(EngineError::Validation(
                    "the pull request template was not changed".into(),
                ));
            }
        }
        let accept_empty_body = draft.accept_empty_body;
        draft = DraftMessage::parse(&edited);
        draft.accept_empty_body = accept_empty_body;
    }
    draft.validate()?;

    let new = NewProposal {
        source_repository: ctx.origin.clone(),
        source_branch: source,
        destination_branch: destination,
        title: draft.title.clone(),
        body: draft.body.clone(),
    };
    match host.create_proposal(&destination_repo, &new).await {
        Ok(proposal) => {
            tracing::info!(
                "Pull request #{} created {}",
                proposal.id,
                proposal.html_url.as_deref().unwrap_or_default()
            );
            Ok(Flow::Completed(proposal))
        }
        Err(e) => match write_backup(git.git_dir(), &draft.text()) {
            Ok(backup) => Err(EngineError::SubmissionFailed {
                backup,
                reason: e.to_string(),
            }),
            Err(save) => {
                tracing::error!(error = %save, "could not save the pull request message");
                Err(e.into())
            }
        },
    }
}

/// Destination branch implied by the source branch's upstream, when that
/// upstream lives on the remote new proposals go to: the upstream remote
/// for forks, origin otherwise.
fn tracked_destination<G: VcsGateway + ?Sized>(
    ctx: &RepositoryContext,
    git: &G,
    source: &str,
    is_fork: bool,
) -> Result<Option<String>, EngineError> {
    let Some(tracking) = git.tracking_branch(source)? else {
        return Ok(None);
    };
    let expected = if is_fork {
        &ctx.upstream_remote
    } else {
        &ctx.origin_remote
    };
    Ok(tracking
        .split_once('/')
        .filter(|(remote, _)| remote == expected)
        .map(|(_, branch)| branch.to_string()))
}

/// The local remote whose URL is one of `repo`'s clone URLs.
fn destination_remote<G: VcsGateway + ?Sized>(
    git: &G,
    repo: &RepositoryInfo,
) -> Result<String, EngineError> {
    for remote in git.remotes()? {
        let Some(url) = git.remote_url(&remote)? else {
            continue;
        };
        if !repo.clone.contains(&url) {
            continue;
        }
        if repo.is_private && repo.clone.ssh.as_deref() != Some(url.as_str()) {
            tracing::warn!(
                "Remote {remote} uses {url}, but {} is private and needs ssh",
                repo.identity
            );
            return Err(EngineError::MissingRemote(format!(
                "no ssh remote for private repository {}",
                repo.identity
            )));
        }
        return Ok(remote);
    }
    Err(EngineError::MissingRemote(format!(
        "no remote points at {}; add one with `git bucket add-remote`",
        repo.identity
    )))
}
