//! Bitbucket Cloud API 2.0 payloads and their mapping onto core types.

use serde::{Deserialize, Serialize};
use spindle_core::{
    Account, CloneLinks, CommitId, NewProposal, Proposal, ProposalDestination, ProposalSource,
    ProposalState, RepositoryIdentity, RepositoryInfo, TeamIdentity, UserIdentity,
};

use crate::error::BitbucketError;

/// One page of a paginated listing.
#[derive(Deserialize)]
pub(crate) struct Page<T> {
    pub values: Vec<T>,
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ApiAccount {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    username: Option<String>,
    nickname: Option<String>,
    display_name: Option<String>,
}

impl ApiAccount {
    fn username(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.nickname.clone())
            .unwrap_or_default()
    }

    pub(crate) fn into_user(self) -> UserIdentity {
        UserIdentity {
            username: self.username(),
            display_name: self.display_name,
        }
    }

    fn into_account(self) -> Account {
        let is_team = self.kind.as_deref() == Some("team");
        let username = self.username();
        if is_team {
            Account::Team(TeamIdentity {
                username,
                display_name: self.display_name,
            })
        } else {
            Account::User(UserIdentity {
                username,
                display_name: self.display_name,
            })
        }
    }
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct Href {
    href: String,
}

#[derive(Deserialize)]
struct CloneLink {
    name: String,
    href: String,
}

#[derive(Deserialize, Default)]
struct RepositoryLinks {
    #[serde(default)]
    clone: Vec<CloneLink>,
    html: Option<Href>,
}

#[derive(Deserialize)]
struct FullName {
    full_name: String,
}

#[derive(Deserialize)]
pub(crate) struct ApiRepository {
    full_name: String,
    #[serde(default)]
    is_private: bool,
    owner: ApiAccount,
    mainbranch: Option<Named>,
    parent: Option<FullName>,
    #[serde(default)]
    links: RepositoryLinks,
}

fn identity(full_name: &str) -> Result<RepositoryIdentity, BitbucketError> {
    RepositoryIdentity::from_full_name(full_name)
        .ok_or_else(|| BitbucketError::Parse(format!("malformed repository name '{full_name}'")))
}

impl TryFrom<ApiRepository> for RepositoryInfo {
    type Error = BitbucketError;

    fn try_from(repo: ApiRepository) -> Result<Self, Self::Error> {
        let mut clone = CloneLinks::default();
        for link in repo.links.clone {
            match link.name.as_str() {
                "https" => clone.https = Some(link.href),
                "ssh" => clone.ssh = Some(link.href),
                _ => {}
            }
        }
        Ok(Self {
            identity: identity(&repo.full_name)?,
            owner: repo.owner.into_account(),
            is_private: repo.is_private,
            main_branch: repo.mainbranch.map(|branch| branch.name),
            clone,
            parent: repo
                .parent
                .map(|parent| identity(&parent.full_name))
                .transpose()?,
            html_url: repo.links.html.map(|link| link.href),
        })
    }
}

#[derive(Deserialize)]
struct Target {
    hash: String,
}

#[derive(Deserialize)]
pub(crate) struct ApiBranch {
    pub name: String,
    target: Target,
}

impl ApiBranch {
    pub(crate) fn head(&self) -> Result<CommitId, BitbucketError> {
        self.target
            .hash
            .parse()
            .map_err(|e| BitbucketError::Parse(format!("branch {}: {e}", self.name)))
    }
}

#[derive(Deserialize)]
struct Endpoint {
    branch: Named,
    commit: Option<Target>,
    repository: FullName,
}

#[derive(Deserialize, Default)]
struct PullRequestLinks {
    html: Option<Href>,
}

#[derive(Deserialize)]
pub(crate) struct ApiPullRequest {
    id: u64,
    title: String,
    state: String,
    author: ApiAccount,
    closed_by: Option<ApiAccount>,
    reason: Option<String>,
    source: Endpoint,
    destination: Endpoint,
    #[serde(default)]
    links: PullRequestLinks,
}

fn state(raw: &str) -> Result<ProposalState, BitbucketError> {
    match raw {
        "OPEN" => Ok(ProposalState::Open),
        "MERGED" => Ok(ProposalState::Merged),
        // A superseded pull request is closed without merging.
        "DECLINED" | "SUPERSEDED" => Ok(ProposalState::Declined),
        other => Err(BitbucketError::Parse(format!(
            "unknown pull request state '{other}'"
        ))),
    }
}

impl TryFrom<ApiPullRequest> for Proposal {
    type Error = BitbucketError;

    fn try_from(pr: ApiPullRequest) -> Result<Self, Self::Error> {
        let commit: CommitId = pr
            .source
            .commit
            .ok_or_else(|| {
                BitbucketError::Parse(format!("pull request #{} has no source commit", pr.id))
            })?
            .hash
            .parse()
            .map_err(|e| BitbucketError::Parse(format!("pull request #{}: {e}", pr.id)))?;
        Ok(Self {
            id: pr.id,
            title: pr.title,
            author: pr.author.into_user(),
            state: state(&pr.state)?,
            source: ProposalSource {
                repository: identity(&pr.source.repository.full_name)?,
                branch: pr.source.branch.name,
                commit,
            },
            destination: ProposalDestination {
                repository: identity(&pr.destination.repository.full_name)?,
                branch: pr.destination.branch.name,
            },
            closed_by: pr.closed_by.map(ApiAccount::into_user),
            reason: pr.reason.filter(|reason| !reason.is_empty()),
            html_url: pr.links.html.map(|link| link.href),
        })
    }
}

#[derive(Serialize)]
struct BranchRef<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct RepositoryRef {
    full_name: String,
}

#[derive(Serialize)]
struct SourceBody<'a> {
    branch: BranchRef<'a>,
    repository: RepositoryRef,
}

#[derive(Serialize)]
struct DestinationBody<'a> {
    branch: BranchRef<'a>,
}

/// POST body for creating a pull request.
#[derive(Serialize)]
pub(crate) struct CreatePullRequest<'a> {
    title: &'a str,
    description: &'a str,
    source: SourceBody<'a>,
    destination: DestinationBody<'a>,
}

impl<'a> From<&'a NewProposal> for CreatePullRequest<'a> {
    fn from(request: &'a NewProposal) -> Self {
        Self {
            title: &request.title,
            description: &request.body,
            source: SourceBody {
                branch: BranchRef {
                    name: &request.source_branch,
                },
                repository: RepositoryRef {
                    full_name: request.source_repository.full_name(),
                },
            },
            destination: DestinationBody {
                branch: BranchRef {
                    name: &request.destination_branch,
                },
            },
        }
    }
}
