//! Locating a proposal's source commit among a remote's refs.
//!
//! Hosting services do not say which ref still carries a proposal's commit
//! (source branches get renamed or deleted after filing), so each plausible
//! ref is fetched in turn, most likely first, until the commit shows up.
//! Probes run strictly one after another since each fetch mutates local refs.

use std::iter;

use spindle_core::{CommitId, VcsGateway};

use crate::EngineError;

/// Inputs for one acquisition run.
#[derive(Debug, Clone, Copy)]
pub struct Acquisition<'a> {
    pub remote_url: &'a str,
    /// As reported by the hosting service; possibly abbreviated.
    pub wanted: &'a CommitId,
    pub preferred_ref: &'a str,
    pub candidates: &'a [String],
    /// Local ref left pointing at the commit once found.
    pub tracking_ref: &'a str,
}

impl Acquisition<'_> {
    /// Refs in probe order: the preferred ref, then the remaining candidates.
    pub fn probe_order(&self) -> impl Iterator<Item = &str> {
        let preferred = self.preferred_ref;
        iter::once(preferred).chain(
            self.candidates
                .iter()
                .map(String::as_str)
                .filter(move |candidate| *candidate != preferred),
        )
    }
}

/// Fetch candidate refs until the wanted commit resolves through the tracking ref.
///
/// A failed fetch only disqualifies that candidate. Fetched objects from
/// failed probes are left behind.
///
/// # Errors
///
/// [`EngineError::ProposalCommitNotFound`] when every candidate was tried
/// without a match; gateway errors other than fetch failures propagate.
pub fn acquire<G: VcsGateway + ?Sized>(
    git: &G,
    request: &Acquisition<'_>,
) -> Result<CommitId, EngineError> {
    let mut tried = 0;
    for refname in request.probe_order() {
        tried += 1;
        tracing::debug!(refname, url = request.remote_url, "probing");
        if let Err(e) = git.fetch(request.remote_url, refname) {
            tracing::debug!(refname, error = %e, "fetch failed, trying next candidate");
            continue;
        }
        if let Some(found) = git.resolve(request.wanted.as_str())? {
            git.update_ref(request.tracking_ref, &found)?;
        }
        match git.resolve(request.tracking_ref)? {
            Some(tracked) if tracked.matches_abbreviated(request.wanted) => {
                tracing::info!(refname, commit = tracked.short(), "found proposal commit");
                return Ok(tracked);
            }
            _ => {}
        }
    }
    Err(EngineError::ProposalCommitNotFound {
        commit: request.wanted.clone(),
        tried,
    })
}
