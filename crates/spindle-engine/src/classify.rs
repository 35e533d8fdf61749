//! History classification through ancestry queries.

use spindle_core::{CommitId, RelationshipClass, VcsGateway};

use crate::EngineError;

/// Classify how `a` relates to `b`.
///
/// Both commits must resolve locally. Two ancestry checks decide the class:
/// `a` reachable from `b` means `a` can fast-forward to `b` ([`Behind`]),
/// the reverse means [`Ahead`], both means [`Identical`], neither means
/// [`Diverged`].
///
/// [`Behind`]: RelationshipClass::Behind
/// [`Ahead`]: RelationshipClass::Ahead
/// [`Identical`]: RelationshipClass::Identical
/// [`Diverged`]: RelationshipClass::Diverged
///
/// # Errors
///
/// [`EngineError::UnresolvableRef`] when either commit is unknown locally,
/// [`EngineError::MergeBaseAmbiguous`] when two distinct commits are each
/// other's ancestor.
pub fn classify<G: VcsGateway + ?Sized>(
    git: &G,
    a: &CommitId,
    b: &CommitId,
) -> Result<RelationshipClass, EngineError> {
    let a = resolve(git, a)?;
    let b = resolve(git, b)?;

    let a_in_b = git.is_ancestor(&a, &b)?;
    let b_in_a = git.is_ancestor(&b, &a)?;

    let class = match (a_in_b, b_in_a) {
        (true, true) if a == b => RelationshipClass::Identical,
        (true, true) => return Err(EngineError::MergeBaseAmbiguous { a, b }),
        (true, false) => RelationshipClass::Behind,
        (false, true) => RelationshipClass::Ahead,
        (false, false) => RelationshipClass::Diverged,
    };
    tracing::debug!(a = a.short(), b = b.short(), %class, "classified");
    Ok(class)
}

fn resolve<G: VcsGateway + ?Sized>(git: &G, id: &CommitId) -> Result<CommitId, EngineError> {
    git.resolve(id.as_str())?
        .ok_or_else(|| EngineError::UnresolvableRef(id.to_string()))
}
