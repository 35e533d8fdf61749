//! # spindle-core
//!
//! Core types and collaborator contracts for spindle.
//!
//! This crate provides the foundational types shared across all spindle crates:
//! - Commit identifiers and the one sanctioned abbreviated-id comparison
//! - Repository, account, and proposal snapshots as retrieved from a hosting service
//! - Decision enums produced by the reconciliation engine
//! - The [`VcsGateway`] and [`ProposalHost`] traits implemented by the adapter crates
//! - Cross-cutting error types for both collaborators

pub mod commit;
pub mod enums;
pub mod errors;
pub mod gateway;
pub mod host;
pub mod proposal;
pub mod repository;

pub use commit::{CommitId, CommitIdError};
pub use enums::{IntegrationPlan, RelationshipClass, SyncDecision};
pub use errors::{GitError, HostError};
pub use gateway::{CommitMessage, VcsGateway};
pub use host::ProposalHost;
pub use proposal::{NewProposal, Proposal, ProposalDestination, ProposalSource, ProposalState};
pub use repository::{
    Account, CloneLinks, CloneProtocol, RepositoryIdentity, RepositoryInfo, TeamIdentity,
    UserIdentity,
};
