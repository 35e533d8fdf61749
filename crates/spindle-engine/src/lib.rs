//! # spindle-engine
//!
//! Reconciliation between a local working copy and its hosted remotes.
//!
//! Decisions are made by small functions over a [`VcsGateway`]:
//! - [`classify`] relates two commits through ancestry queries
//! - [`acquire`] probes remote refs until a proposal's commit is local
//! - [`plan`] / [`sync_branch`] decide and confirm pushes of a local branch
//! - [`select`] / [`execute`] pick and run fast-forward, replay or skip
//!
//! The orchestrators [`apply_proposal`], [`submit_proposal`] and
//! [`add_fork_remote`] compose these with a [`ProposalHost`], a [`Confirm`]
//! capability and, for submissions, a [`MessageEditor`]. Everything runs
//! strictly sequentially; host calls are awaited one at a time.
//!
//! [`VcsGateway`]: spindle_core::VcsGateway
//! [`ProposalHost`]: spindle_core::ProposalHost

mod acquire;
mod apply;
mod classify;
mod confirm;
mod context;
mod error;
mod fork_graph;
pub mod message;
mod outcome;
mod planner;
mod remotes;
mod selector;
mod submit;

#[cfg(test)]
mod test_support;

pub use acquire::{Acquisition, acquire};
pub use apply::{ApplyReport, ApplyRequest, apply_proposal};
pub use classify::classify;
pub use confirm::{AcceptDefaults, AlwaysNo, AlwaysYes, Confirm, PromptConfirm, TerminalConfirm};
pub use context::RepositoryContext;
pub use error::EngineError;
pub use fork_graph::find_fork;
pub use message::{DraftMessage, KeepMessage, MessageEditor};
pub use outcome::{ExitOutcome, Flow};
pub use planner::{plan, sync_branch};
pub use remotes::{AddRemoteRequest, AddedRemote, add_fork_remote};
pub use selector::{execute, select};
pub use submit::{MessageSource, SubmitRequest, parse_branch_spec, submit_proposal};
