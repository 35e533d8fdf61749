//! Adding another user's fork as a local remote.

use serde::Serialize;
use spindle_core::{CloneProtocol, ProposalHost, RepositoryIdentity, VcsGateway};

use crate::{EngineError, RepositoryContext, find_fork};

#[derive(Debug, Clone)]
pub struct AddRemoteRequest {
    /// A username whose fork to look up, or an explicit `owner/slug`.
    pub target: String,
    /// Remote name; the repository owner's username when absent.
    pub name: Option<String>,
    pub protocol: CloneProtocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedRemote {
    pub name: String,
    pub url: String,
    pub repository: RepositoryIdentity,
}

/// Locate the requested repository, add it as a remote and fetch it with tags.
///
/// A target without `/` is searched for in the fork network of the context's
/// destination repository. `login` decides which repositories count as the
/// user's own when picking a clone URL.
///
/// # Errors
///
/// [`EngineError::NotFound`] when no such fork exists; gateway and host
/// errors otherwise.
pub async fn add_fork_remote<G, H>(
    ctx: &RepositoryContext,
    git: &G,
    host: &H,
    login: &str,
    request: &AddRemoteRequest,
) -> Result<AddedRemote, EngineError>
where
    G: VcsGateway + ?Sized,
    H: ProposalHost + ?Sized,
{
    let repo = if request.target.contains('/') {
        let identity = RepositoryIdentity::from_full_name(&request.target).ok_or_else(|| {
            EngineError::Validation(format!("'{}' is not an owner/slug name", request.target))
        })?;
        host.repository(&identity).await?
    } else {
        let start = host.repository(ctx.destination()).await?;
        find_fork(host, &start, &request.target)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("fork of {}", request.target)))?
    };

    let name = request
        .name
        .clone()
        .unwrap_or_else(|| repo.owner.username().to_string());
    let url = repo
        .clone_url(request.protocol, login)
        .ok_or_else(|| EngineError::NotFound(format!("clone URL for {}", repo.identity)))?
        .to_string();

    tracing::info!(remote = %name, %url, "adding remote");
    git.add_remote(&name, &url)?;
    git.fetch_remote(&name, true)?;

    Ok(AddedRemote {
        name,
        url,
        repository: repo.identity,
    })
}
