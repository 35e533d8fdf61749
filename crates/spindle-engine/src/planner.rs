//! Branch sync planning: getting a local branch onto a remote without
//! silently discarding remote-only commits.

use spindle_core::{CommitId, RelationshipClass, SyncDecision, VcsGateway};

use crate::{Confirm, EngineError, Flow, classify};

/// Decide how `local_head` should reach a remote branch at `remote_head`.
///
/// A remote head the local repository has never seen cannot be classified;
/// it is planned as a force push since overwriting it loses commits nobody
/// here has looked at.
///
/// # Errors
///
/// Propagates classification errors other than an unknown remote head.
pub fn plan<G: VcsGateway + ?Sized>(
    git: &G,
    local_head: &CommitId,
    remote_head: Option<&CommitId>,
) -> Result<SyncDecision, EngineError> {
    let Some(remote_head) = remote_head else {
        return Ok(SyncDecision::Push);
    };
    if remote_head == local_head {
        return Ok(SyncDecision::Noop);
    }
    if git.resolve(remote_head.as_str())?.is_none() {
        tracing::debug!(remote = remote_head.short(), "remote head unknown locally");
        return Ok(SyncDecision::ForcePushWithConfirm);
    }
    Ok(match classify(git, remote_head, local_head)? {
        RelationshipClass::Identical => SyncDecision::Noop,
        RelationshipClass::Behind => SyncDecision::PushWithConfirm,
        RelationshipClass::Ahead | RelationshipClass::Diverged => {
            SyncDecision::ForcePushWithConfirm
        }
    })
}

fn prompt(decision: SyncDecision, remote: &str, branch: &str) -> String {
    match decision {
        SyncDecision::Noop => String::new(),
        SyncDecision::Push => {
            format!("Branch {branch} does not exist on {remote}, shall I push?")
        }
        SyncDecision::PushWithConfirm => format!(
            "Branch {branch} is not up to date on {remote}, but can be fast forwarded, shall I push?"
        ),
        SyncDecision::ForcePushWithConfirm => {
            format!("Branch {branch} has diverged from {remote}, shall I push and overwrite?")
        }
    }
}

/// Plan and, once confirmed, carry out the push of `branch` to `remote`.
///
/// Every decision other than [`SyncDecision::Noop`] is put to the user
/// first; declining yields [`Flow::Aborted`] without pushing.
///
/// # Errors
///
/// Planning and push failures.
pub fn sync_branch<G, C>(
    git: &G,
    confirm: &mut C,
    remote: &str,
    branch: &str,
    local_head: &CommitId,
    remote_head: Option<&CommitId>,
) -> Result<Flow<SyncDecision>, EngineError>
where
    G: VcsGateway + ?Sized,
    C: Confirm + ?Sized,
{
    let decision = plan(git, local_head, remote_head)?;
    tracing::debug!(branch, remote, %decision, "sync plan");
    if decision == SyncDecision::Noop {
        return Ok(Flow::Completed(decision));
    }
    if !confirm.confirm(&prompt(decision, remote, branch), decision.default_answer()) {
        return Ok(Flow::Aborted);
    }
    tracing::info!(branch, remote, force = decision.is_force(), "pushing");
    git.push(remote, branch, decision.is_force())?;
    Ok(Flow::Completed(decision))
}
