//! Breadth-first search through a repository's fork network.

use std::collections::{HashSet, VecDeque};

use spindle_core::{ProposalHost, RepositoryInfo};

use crate::EngineError;

/// Find the repository owned by `user` in the fork network around `start`.
///
/// Both directions are followed: the forks of each node and its parent.
/// Every repository is visited at most once, so cycles in the reported
/// network terminate. `start` itself is never a match.
///
/// # Errors
///
/// Host errors while listing forks or looking up parents.
pub async fn find_fork<H: ProposalHost + ?Sized>(
    host: &H,
    start: &RepositoryInfo,
    user: &str,
) -> Result<Option<RepositoryInfo>, EngineError> {
    let mut visited = HashSet::from([start.identity.clone()]);
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(node) = queue.pop_front() {
        tracing::debug!(repo = %node.identity, "searching forks");
        let mut neighbours = host.forks(&node.identity).await?;
        if let Some(parent) = node.parent.as_ref().filter(|p| !visited.contains(*p)) {
            neighbours.push(host.repository(parent).await?);
        }
        for repo in neighbours {
            if !visited.insert(repo.identity.clone()) {
                continue;
            }
            if repo.owner.username() == user {
                return Ok(Some(repo));
            }
            queue.push_back(repo);
        }
    }
    Ok(None)
}
