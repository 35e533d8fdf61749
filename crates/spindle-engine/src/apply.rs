//! Applying an existing remote proposal to the local checkout.
//!
//! ```text
//! retrieve proposal → warn if anomalous → acquire source ref
//!     → classify and select → execute plan
//! ```

use serde::Serialize;
use spindle_core::{
    CommitId, IntegrationPlan, Proposal, ProposalHost, ProposalState, RepositoryIdentity,
    VcsGateway,
};

use crate::{Acquisition, Confirm, EngineError, Flow, RepositoryContext, acquire, execute, select};

#[derive(Debug, Clone, Copy)]
pub struct ApplyRequest {
    pub id: u64,
    /// Look the proposal up on the parent of the origin repository.
    pub prefer_parent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub id: u64,
    pub title: String,
    pub tracking_ref: String,
    pub source_commit: CommitId,
    pub plan: IntegrationPlan,
}

/// Fetch proposal `request.id` and integrate it into the current checkout.
///
/// # Errors
///
/// See [`EngineError`]; a replay conflict leaves the working tree conflicted.
pub async fn apply_proposal<G, H, C>(
    ctx: &RepositoryContext,
    git: &G,
    host: &H,
    confirm: &mut C,
    request: ApplyRequest,
) -> Result<Flow<ApplyReport>, EngineError>
where
    G: VcsGateway + ?Sized,
    H: ProposalHost + ?Sized,
    C: Confirm + ?Sized,
{
    let repo = proposal_repository(ctx, host, request.prefer_parent).await?;
    let proposal = host.proposal(&repo, request.id).await?;
    tracing::info!(
        "Applying pull request #{} from {}: {}",
        proposal.id,
        proposal.author.label(),
        proposal.title
    );

    if warn_if_anomalous(git, &proposal)? && !confirm.confirm("Continue?", false) {
        return Ok(Flow::Aborted);
    }

    let tracking_ref = ctx.proposal_ref(request.prefer_parent, proposal.id);
    let source_commit = match git.resolve(&tracking_ref)? {
        Some(known) if known.matches_abbreviated(&proposal.source.commit) => {
            tracing::debug!(%tracking_ref, "proposal commit already fetched");
            known
        }
        _ => acquire_source(git, host, &proposal, &tracking_ref).await?,
    };

    let destination_head = git
        .resolve("HEAD")?
        .ok_or_else(|| EngineError::UnresolvableRef("HEAD".into()))?;
    let plan = select(git, &destination_head, &source_commit)?;
    execute(git, &plan, &tracking_ref)?;

    Ok(Flow::Completed(ApplyReport {
        id: proposal.id,
        title: proposal.title,
        tracking_ref,
        source_commit,
        plan,
    }))
}

async fn proposal_repository<H: ProposalHost + ?Sized>(
    ctx: &RepositoryContext,
    host: &H,
    prefer_parent: bool,
) -> Result<RepositoryIdentity, EngineError> {
    if !prefer_parent {
        return Ok(ctx.origin.clone());
    }
    host.repository(&ctx.origin)
        .await?
        .parent
        .ok_or_else(|| EngineError::Validation(format!("{} is not a fork", ctx.origin)))
}

/// Log every anomaly; true when at least one fired.
fn warn_if_anomalous<G: VcsGateway + ?Sized>(
    git: &G,
    proposal: &Proposal,
) -> Result<bool, EngineError> {
    let mut anomalous = false;
    let wanted = &proposal.destination.branch;
    match git.current_branch()? {
        Some(current) if &current == wanted => {}
        Some(current) => {
            tracing::warn!(
                "Pull request #{} targets branch {wanted}, but you have {current} checked out",
                proposal.id
            );
            anomalous = true;
        }
        None => {
            tracing::warn!(
                "Pull request #{} targets branch {wanted}, but HEAD is detached",
                proposal.id
            );
            anomalous = true;
        }
    }
    match proposal.state {
        ProposalState::Open => {}
        ProposalState::Merged => {
            let by = proposal
                .closed_by
                .as_ref()
                .map_or("someone", |user| user.label());
            tracing::warn!("Pull request #{} was already merged by {by}", proposal.id);
            anomalous = true;
        }
        ProposalState::Declined => {
            let reason = proposal.reason.as_deref().unwrap_or("no reason given");
            tracing::warn!("Pull request #{} was declined: {reason}", proposal.id);
            anomalous = true;
        }
    }
    Ok(anomalous)
}

async fn acquire_source<G, H>(
    git: &G,
    host: &H,
    proposal: &Proposal,
    tracking_ref: &str,
) -> Result<CommitId, EngineError>
where
    G: VcsGateway + ?Sized,
    H: ProposalHost + ?Sized,
{
    let source = host.repository(&proposal.source.repository).await?;
    let url = source
        .clone
        .https
        .as_deref()
        .or(source.clone.ssh.as_deref())
        .ok_or_else(|| EngineError::NotFound(format!("clone URL for {}", source.identity)))?;

    tracing::info!("Fetching from {url}");
    let candidates = git.list_remote_refs(url).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not list remote refs, trying the source branch only");
        Vec::new()
    });
    let preferred_ref = format!("refs/heads/{}", proposal.source.branch);
    acquire(
        git,
        &Acquisition {
            remote_url: url,
            wanted: &proposal.source.commit,
            preferred_ref: &preferred_ref,
            candidates: &candidates,
            tracking_ref,
        },
    )
}
