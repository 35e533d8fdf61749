//! Repository and account identities as seen through a hosting service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `(owner, slug)` pair naming one hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub slug: String,
}

impl RepositoryIdentity {
    #[must_use]
    pub fn new(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    /// Parse an `owner/slug` full name.
    #[must_use]
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let (owner, slug) = full_name.trim().split_once('/')?;
        if owner.is_empty() || slug.is_empty() || slug.contains('/') {
            return None;
        }
        Some(Self::new(owner, slug))
    }

    /// Extract the identity from a git remote URL hosted on one of `hosts`.
    ///
    /// Accepts scp-like SSH (`git@host:owner/slug.git`), `ssh://`, and
    /// `https://[user@]host/owner/slug[.git]` forms.
    #[must_use]
    pub fn from_remote_url(url: &str, hosts: &[String]) -> Option<Self> {
        let url = url.trim();
        let (host, path) = if let Some((_, rest)) = url.split_once("://") {
            let (authority, path) = rest.split_once('/')?;
            let host = authority.rsplit('@').next()?;
            let host = host.split(':').next()?;
            (host, path)
        } else {
            let (authority, path) = url.split_once(':')?;
            (authority.rsplit('@').next()?, path)
        };

        if !hosts.iter().any(|candidate| candidate.eq_ignore_ascii_case(host)) {
            return None;
        }

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        Self::from_full_name(path)
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.slug)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    pub display_name: Option<String>,
}

impl UserIdentity {
    /// Display name when the service provides one, username otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamIdentity {
    pub username: String,
    pub display_name: Option<String>,
}

/// Owner of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Account {
    User(UserIdentity),
    Team(TeamIdentity),
}

impl Account {
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::User(user) => &user.username,
            Self::Team(team) => &team.username,
        }
    }
}

/// Protocol preference when choosing a clone URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneProtocol {
    #[default]
    Auto,
    Ssh,
    Https,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneLinks {
    pub https: Option<String>,
    pub ssh: Option<String>,
}

impl CloneLinks {
    /// True when `url` is one of the advertised clone URLs.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.https.as_deref() == Some(url) || self.ssh.as_deref() == Some(url)
    }
}

/// Repository snapshot exposing the capabilities the engine needs:
/// the identity branch listings are keyed by, clone URLs, and the fork parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub identity: RepositoryIdentity,
    pub owner: Account,
    pub is_private: bool,
    pub main_branch: Option<String>,
    pub clone: CloneLinks,
    pub parent: Option<RepositoryIdentity>,
    pub html_url: Option<String>,
}

impl RepositoryInfo {
    #[must_use]
    pub fn is_fork(&self) -> bool {
        self.parent.is_some()
    }

    /// Pick the clone URL for this repository.
    ///
    /// Private repositories always use SSH. Without an explicit preference,
    /// repositories owned by `my_login` use SSH and everything else HTTPS.
    #[must_use]
    pub fn clone_url(&self, protocol: CloneProtocol, my_login: &str) -> Option<&str> {
        let ssh = self.clone.ssh.as_deref();
        let https = self.clone.https.as_deref();
        if protocol == CloneProtocol::Ssh || self.is_private {
            return ssh.or(https);
        }
        if protocol == CloneProtocol::Https {
            return https.or(ssh);
        }
        if self.owner.username() == my_login {
            ssh.or(https)
        } else {
            https.or(ssh)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn hosts() -> Vec<String> {
        vec!["bitbucket.org".to_string(), "www.bitbucket.org".to_string()]
    }

    #[rstest]
    #[case("git@bitbucket.org:alice/widget.git")]
    #[case("ssh://git@bitbucket.org/alice/widget.git")]
    #[case("https://alice@bitbucket.org/alice/widget.git")]
    #[case("https://bitbucket.org/alice/widget")]
    #[case("https://www.bitbucket.org/alice/widget/")]
    fn parses_remote_url_forms(#[case] url: &str) {
        assert_eq!(
            RepositoryIdentity::from_remote_url(url, &hosts()),
            Some(RepositoryIdentity::new("alice", "widget"))
        );
    }

    #[rstest]
    #[case("git@github.com:alice/widget.git")]
    #[case("https://bitbucket.org/alice")]
    #[case("/srv/git/widget.git")]
    fn rejects_foreign_or_malformed_urls(#[case] url: &str) {
        assert_eq!(RepositoryIdentity::from_remote_url(url, &hosts()), None);
    }

    fn repo(owner: &str, is_private: bool) -> RepositoryInfo {
        RepositoryInfo {
            identity: RepositoryIdentity::new(owner, "widget"),
            owner: Account::User(UserIdentity {
                username: owner.to_string(),
                display_name: None,
            }),
            is_private,
            main_branch: Some("master".to_string()),
            clone: CloneLinks {
                https: Some(format!("https://bitbucket.org/{owner}/widget.git")),
                ssh: Some(format!("git@bitbucket.org:{owner}/widget.git")),
            },
            parent: None,
            html_url: None,
        }
    }

    #[test]
    fn clone_url_prefers_ssh_for_own_and_private_repos() {
        assert_eq!(
            repo("alice", false).clone_url(CloneProtocol::Auto, "alice"),
            Some("git@bitbucket.org:alice/widget.git")
        );
        assert_eq!(
            repo("bob", true).clone_url(CloneProtocol::Https, "alice"),
            Some("git@bitbucket.org:bob/widget.git")
        );
    }

    #[test]
    fn clone_url_uses_https_for_foreign_public_repos() {
        assert_eq!(
            repo("bob", false).clone_url(CloneProtocol::Auto, "alice"),
            Some("https://bitbucket.org/bob/widget.git")
        );
        assert_eq!(
            repo("bob", false).clone_url(CloneProtocol::Ssh, "alice"),
            Some("git@bitbucket.org:bob/widget.git")
        );
    }

    #[test]
    fn user_label_falls_back_to_username() {
        let user = UserIdentity {
            username: "alice".into(),
            display_name: Some(String::new()),
        };
        assert_eq!(user.label(), "alice");
    }
}
