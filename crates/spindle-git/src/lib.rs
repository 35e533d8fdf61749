//! # spindle-git
//!
//! Version-control gateway for spindle.
//!
//! Uses `gix` (pure Rust git implementation) for:
//! - Repository discovery and remote URL lookup
//! - Revision resolution and current-branch detection
//! - Tracking-ref updates
//!
//! Network and history-rewriting operations (fetch, push, merge, cherry-pick)
//! shell out to the `git` binary so credential helpers, hooks, and conflict
//! handling behave exactly as the user expects.
//!
//! This crate isolates the `gix` dependency from the rest of the workspace.

mod gateway;
mod repo;

pub use gateway::GitGateway;
pub use repo::{RepoLocation, discover_repo};
