//! Integration strategy selection and execution.

use spindle_core::{CommitId, GitError, IntegrationPlan, RelationshipClass, VcsGateway};

use crate::{EngineError, classify};

/// Pick how to bring `fetched_source` into a checkout at `destination_head`.
///
/// The already-integrated check runs first: a destination that contains the
/// source, or equals it, is skipped even where a fast-forward would also be
/// valid by raw ancestry.
///
/// # Errors
///
/// Classification errors; both commits must resolve locally.
pub fn select<G: VcsGateway + ?Sized>(
    git: &G,
    destination_head: &CommitId,
    fetched_source: &CommitId,
) -> Result<IntegrationPlan, EngineError> {
    let plan = match classify(git, fetched_source, destination_head)? {
        RelationshipClass::Behind | RelationshipClass::Identical => IntegrationPlan::Skip,
        RelationshipClass::Ahead => IntegrationPlan::FastForward,
        RelationshipClass::Diverged => IntegrationPlan::Replay {
            range_start: destination_head.clone(),
            range_end: fetched_source.clone(),
        },
    };
    Ok(plan)
}

/// Carry out `plan` on the current checkout. `source_ref` names the fetched
/// source for the fast-forward merge.
///
/// # Errors
///
/// A failed fast-forward propagates as a git error. Replay conflicts become
/// [`EngineError::ConflictDuringReplay`] with the tree left conflicted.
pub fn execute<G: VcsGateway + ?Sized>(
    git: &G,
    plan: &IntegrationPlan,
    source_ref: &str,
) -> Result<(), EngineError> {
    match plan {
        IntegrationPlan::Skip => {
            tracing::info!("Pull request already integrated, nothing to do");
        }
        IntegrationPlan::FastForward => {
            tracing::info!(source_ref, "fast-forwarding");
            git.merge_fast_forward_only(source_ref)?;
        }
        IntegrationPlan::Replay {
            range_start,
            range_end,
        } => {
            tracing::info!(
                from = range_start.short(),
                to = range_end.short(),
                "cherry-picking"
            );
            git.cherry_pick_range(range_start, range_end)
                .map_err(|e| match e {
                    GitError::Conflict { .. } => EngineError::ConflictDuringReplay {
                        from: range_start.clone(),
                        to: range_end.clone(),
                    },
                    other => other.into(),
                })?;
        }
    }
    Ok(())
}
