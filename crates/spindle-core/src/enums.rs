//! Decision enums produced by the reconciliation engine.
//!
//! None of these carry I/O; they are the output contracts of the classifier,
//! the branch sync planner, and the integration strategy selector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commit::CommitId;

// ---------------------------------------------------------------------------
// RelationshipClass
// ---------------------------------------------------------------------------

/// How a candidate commit `a` relates to a reference commit `b`.
///
/// ```text
/// a == b                          → identical
/// a ancestor of b                 → behind   (a can fast-forward to b)
/// b ancestor of a                 → ahead
/// neither                         → diverged
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipClass {
    Identical,
    Ahead,
    Behind,
    Diverged,
}

impl RelationshipClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Diverged => "diverged",
        }
    }

    /// The class of the reversed pair `(b, a)`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ahead => Self::Behind,
            Self::Behind => Self::Ahead,
            Self::Identical | Self::Diverged => self,
        }
    }
}

impl fmt::Display for RelationshipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SyncDecision
// ---------------------------------------------------------------------------

/// What to do with a local branch that must exist on a remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDecision {
    Noop,
    /// Branch is absent remotely; publishing it still needs confirmation.
    Push,
    /// Remote can fast-forward to the local head.
    PushWithConfirm,
    /// Remote has commits the local branch lacks; overwriting loses them.
    ForcePushWithConfirm,
}

impl SyncDecision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Push => "push",
            Self::PushWithConfirm => "push_with_confirm",
            Self::ForcePushWithConfirm => "force_push_with_confirm",
        }
    }

    #[must_use]
    pub const fn is_force(self) -> bool {
        matches!(self, Self::ForcePushWithConfirm)
    }

    /// Answer assumed when the user just presses enter.
    #[must_use]
    pub const fn default_answer(self) -> bool {
        !self.is_force()
    }
}

impl fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IntegrationPlan
// ---------------------------------------------------------------------------

/// How to bring a fetched proposal commit into the current checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IntegrationPlan {
    /// The destination already contains the proposal.
    Skip,
    FastForward,
    /// Replay `range_start..range_end` (exclusive, inclusive), oldest first.
    Replay {
        range_start: CommitId,
        range_end: CommitId,
    },
}
