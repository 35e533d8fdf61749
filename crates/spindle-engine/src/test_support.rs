//! In-memory collaborators for engine tests.
//!
//! `FakeGit` models a commit graph plus the local ref namespace, `FakeHost`
//! serves canned repositories and proposals, and `ScriptedConfirm` answers
//! prompts from a queue.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use spindle_core::{
    Account, CloneLinks, CommitId, CommitMessage, GitError, HostError, NewProposal, Proposal,
    ProposalDestination, ProposalHost, ProposalSource, ProposalState, RepositoryIdentity,
    RepositoryInfo, UserIdentity, VcsGateway,
};

use crate::{Confirm, EngineError, MessageEditor, RepositoryContext};

/// Full-length id for commit number `n`; the first 12 digits are unique.
pub fn oid(n: u32) -> CommitId {
    format!("{n:012x}{}", "0".repeat(28)).parse().unwrap()
}

/// The 12-digit form a hosting service reports for commit `n`.
pub fn short_oid(n: u32) -> CommitId {
    oid(n).as_str()[..12].parse().unwrap()
}

pub fn ident(full_name: &str) -> RepositoryIdentity {
    RepositoryIdentity::from_full_name(full_name).unwrap()
}

// ---------------------------------------------------------------------------
// FakeGit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Fetch { url: String, refspec: String },
    FetchRemote { remote: String, with_tags: bool },
    Push { remote: String, branch: String, force: bool },
    Merge(String),
    CherryPick { from: CommitId, to: CommitId },
    UpdateRef { name: String, target: CommitId },
    AddRemote { name: String, url: String },
}

#[derive(Default)]
struct GitState {
    /// Insertion order doubles as topological order.
    order: Vec<CommitId>,
    parents: HashMap<CommitId, Vec<CommitId>>,
    local: HashSet<CommitId>,
    refs: BTreeMap<String, CommitId>,
    head: Option<String>,
    remotes: BTreeMap<String, String>,
    calls: Vec<GitCall>,
}

pub struct FakeGit {
    root: PathBuf,
    git_dir: PathBuf,
    state: RefCell<GitState>,
    advertised: HashMap<String, BTreeMap<String, CommitId>>,
    messages: HashMap<CommitId, CommitMessage>,
    tracking: HashMap<String, String>,
    failing_fetches: HashSet<String>,
    conflict: bool,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::with_git_dir(PathBuf::from("/work/repo/.git"))
    }

    pub fn with_git_dir(git_dir: PathBuf) -> Self {
        let root = git_dir
            .parent()
            .map_or_else(|| PathBuf::from("/work/repo"), Path::to_path_buf);
        Self {
            root,
            git_dir,
            state: RefCell::new(GitState {
                head: Some("master".into()),
                ..GitState::default()
            }),
            advertised: HashMap::new(),
            messages: HashMap::new(),
            tracking: HashMap::new(),
            failing_fetches: HashSet::new(),
            conflict: false,
        }
    }

    /// Add commit `n` present in the local object store.
    pub fn commit(&self, n: u32, parents: &[u32]) -> CommitId {
        let id = self.remote_commit(n, parents);
        self.state.borrow_mut().local.insert(id.clone());
        id
    }

    /// Add commit `n` that only exists on some remote until fetched.
    pub fn remote_commit(&self, n: u32, parents: &[u32]) -> CommitId {
        let id = oid(n);
        let mut state = self.state.borrow_mut();
        state.order.push(id.clone());
        state
            .parents
            .insert(id.clone(), parents.iter().map(|p| oid(*p)).collect());
        id
    }

    /// Add local commits `from..=to`, each the parent of the next, on top of `base`.
    pub fn chain(&self, base: Option<u32>, from: u32, to: u32) -> CommitId {
        let mut parent = base;
        let mut last = oid(from);
        for n in from..=to {
            last = self.commit(n, parent.as_slice());
            parent = Some(n);
        }
        last
    }

    pub fn set_ref(&self, name: &str, n: u32) {
        self.state.borrow_mut().refs.insert(name.to_string(), oid(n));
    }

    /// Point `refs/heads/<branch>` at `n` and check it out.
    pub fn checkout(&self, branch: &str, n: u32) {
        self.set_ref(&format!("refs/heads/{branch}"), n);
        self.state.borrow_mut().head = Some(branch.to_string());
    }

    pub fn detach(&self) {
        self.state.borrow_mut().head = None;
    }

    pub fn add_remote_url(&self, name: &str, url: &str) {
        self.state
            .borrow_mut()
            .remotes
            .insert(name.to_string(), url.to_string());
    }

    /// Make `url` advertise `refname` at commit `n`.
    pub fn advertise(&mut self, url: &str, refname: &str, n: u32) {
        self.advertised
            .entry(url.to_string())
            .or_default()
            .insert(refname.to_string(), oid(n));
    }

    pub fn fail_fetch(&mut self, refname: &str) {
        self.failing_fetches.insert(refname.to_string());
    }

    pub fn set_message(&mut self, n: u32, subject: &str, body: &str) {
        self.messages.insert(
            oid(n),
            CommitMessage {
                subject: subject.to_string(),
                body: body.to_string(),
            },
        );
    }

    pub fn set_tracking(&mut self, branch: &str, upstream: &str) {
        self.tracking
            .insert(branch.to_string(), upstream.to_string());
    }

    pub fn set_conflict(&mut self) {
        self.conflict = true;
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.state.borrow().calls.clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitCall::Fetch { refspec, .. } => Some(refspec),
                _ => None,
            })
            .collect()
    }

    pub fn pushes(&self) -> Vec<GitCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, GitCall::Push { .. }))
            .collect()
    }

    pub fn integrations(&self) -> Vec<GitCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, GitCall::Merge(_) | GitCall::CherryPick { .. }))
            .collect()
    }

    pub fn ref_target(&self, name: &str) -> Option<CommitId> {
        self.state.borrow().refs.get(name).cloned()
    }

    fn record(&self, call: GitCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn mark_local(&self, tip: &CommitId) {
        let mut state = self.state.borrow_mut();
        let mut pending = vec![tip.clone()];
        while let Some(id) = pending.pop() {
            if state.local.insert(id.clone()) {
                pending.extend(state.parents.get(&id).cloned().unwrap_or_default());
            }
        }
    }

    fn ancestors(&self, tip: &CommitId) -> HashSet<CommitId> {
        let state = self.state.borrow();
        let mut seen = HashSet::new();
        let mut pending = vec![tip.clone()];
        while let Some(id) = pending.pop() {
            if seen.insert(id.clone()) {
                pending.extend(state.parents.get(&id).cloned().unwrap_or_default());
            }
        }
        seen
    }

    fn require(&self, rev: &str) -> Result<CommitId, GitError> {
        self.resolve(rev)?.ok_or_else(|| GitError::Command {
            command: format!("git rev-parse {rev}"),
            stderr: format!("unknown revision {rev}"),
        })
    }
}

impl VcsGateway for FakeGit {
    fn root(&self) -> &Path {
        &self.root
    }

    fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn resolve(&self, rev: &str) -> Result<Option<CommitId>, GitError> {
        let state = self.state.borrow();
        if rev == "HEAD" {
            return Ok(state
                .head
                .as_ref()
                .and_then(|branch| state.refs.get(&format!("refs/heads/{branch}")))
                .cloned());
        }
        for candidate in [
            rev.to_string(),
            format!("refs/heads/{rev}"),
            format!("refs/remotes/{rev}"),
        ] {
            if let Some(id) = state.refs.get(&candidate) {
                return Ok(Some(id.clone()));
            }
        }
        let Ok(prefix) = rev.parse::<CommitId>() else {
            return Ok(None);
        };
        let mut matches = state
            .local
            .iter()
            .filter(|id| id.matches_abbreviated(&prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(Some(id.clone())),
            _ => Ok(None),
        }
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool, GitError> {
        Ok(self.ancestors(descendant).contains(ancestor))
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        Ok(self.state.borrow().head.clone())
    }

    fn update_ref(&self, name: &str, target: &CommitId) -> Result<(), GitError> {
        self.record(GitCall::UpdateRef {
            name: name.to_string(),
            target: target.clone(),
        });
        self.state
            .borrow_mut()
            .refs
            .insert(name.to_string(), target.clone());
        Ok(())
    }

    fn fetch(&self, url: &str, refspec: &str) -> Result<(), GitError> {
        self.record(GitCall::Fetch {
            url: url.to_string(),
            refspec: refspec.to_string(),
        });
        let target = self
            .advertised
            .get(url)
            .and_then(|refs| refs.get(refspec))
            .filter(|_| !self.failing_fetches.contains(refspec))
            .cloned()
            .ok_or_else(|| GitError::Command {
                command: format!("git fetch {url} {refspec}"),
                stderr: format!("couldn't find remote ref {refspec}"),
            })?;
        self.mark_local(&target);
        self.state
            .borrow_mut()
            .refs
            .insert("FETCH_HEAD".into(), target);
        Ok(())
    }

    fn fetch_remote(&self, remote: &str, with_tags: bool) -> Result<(), GitError> {
        self.record(GitCall::FetchRemote {
            remote: remote.to_string(),
            with_tags,
        });
        let url = self.remote_url(remote)?.ok_or_else(|| GitError::Command {
            command: format!("git fetch {remote}"),
            stderr: format!("'{remote}' does not appear to be a git repository"),
        })?;
        for (refname, target) in self.advertised.get(&url).cloned().unwrap_or_default() {
            if let Some(branch) = refname.strip_prefix("refs/heads/") {
                self.mark_local(&target);
                self.state
                    .borrow_mut()
                    .refs
                    .insert(format!("refs/remotes/{remote}/{branch}"), target);
            }
        }
        Ok(())
    }

    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>, GitError> {
        Ok(self
            .advertised
            .get(url)
            .map(|refs| refs.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<(), GitError> {
        self.record(GitCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
            force,
        });
        Ok(())
    }

    fn merge_fast_forward_only(&self, rev: &str) -> Result<(), GitError> {
        self.record(GitCall::Merge(rev.to_string()));
        let target = self.require(rev)?;
        let head = self.require("HEAD")?;
        if !self.is_ancestor(&head, &target)? {
            return Err(GitError::Command {
                command: format!("git merge --ff-only {rev}"),
                stderr: "Not possible to fast-forward, aborting.".into(),
            });
        }
        let branch = self.state.borrow().head.clone();
        if let Some(branch) = branch {
            self.state
                .borrow_mut()
                .refs
                .insert(format!("refs/heads/{branch}"), target);
        }
        Ok(())
    }

    fn cherry_pick_range(
        &self,
        from_exclusive: &CommitId,
        to_inclusive: &CommitId,
    ) -> Result<(), GitError> {
        self.record(GitCall::CherryPick {
            from: from_exclusive.clone(),
            to: to_inclusive.clone(),
        });
        if self.conflict {
            return Err(GitError::Conflict {
                command: format!("git cherry-pick {from_exclusive}..{to_inclusive}"),
            });
        }
        Ok(())
    }

    fn commit_range(
        &self,
        from_exclusive: &str,
        to_inclusive: &str,
    ) -> Result<Vec<CommitId>, GitError> {
        let excluded = self.ancestors(&self.require(from_exclusive)?);
        let included = self.ancestors(&self.require(to_inclusive)?);
        Ok(self
            .state
            .borrow()
            .order
            .iter()
            .filter(|id| included.contains(*id) && !excluded.contains(*id))
            .cloned()
            .collect())
    }

    fn commit_message(&self, rev: &str) -> Result<CommitMessage, GitError> {
        let id = self.require(rev)?;
        Ok(self.messages.get(&id).cloned().unwrap_or_default())
    }

    fn tracking_branch(&self, branch: &str) -> Result<Option<String>, GitError> {
        Ok(self.tracking.get(branch).cloned())
    }

    fn remotes(&self) -> Result<Vec<String>, GitError> {
        Ok(self.state.borrow().remotes.keys().cloned().collect())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        Ok(self.state.borrow().remotes.get(remote).cloned())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.record(GitCall::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
        self.add_remote_url(name, url);
        Ok(())
    }

    fn shortlog(&self, range: &str) -> Result<String, GitError> {
        Ok(format!("shortlog {range}"))
    }

    fn diff_stat(&self, range: &str) -> Result<String, GitError> {
        Ok(format!("diffstat {range}"))
    }
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

pub fn https_url(repo: &RepositoryIdentity) -> String {
    format!("https://bitbucket.org/{}/{}.git", repo.owner, repo.slug)
}

pub fn ssh_url(repo: &RepositoryIdentity) -> String {
    format!("git@bitbucket.org:{}/{}.git", repo.owner, repo.slug)
}

pub fn repo_info(full_name: &str, parent: Option<&str>) -> RepositoryInfo {
    let identity = ident(full_name);
    RepositoryInfo {
        owner: Account::User(UserIdentity {
            username: identity.owner.clone(),
            display_name: None,
        }),
        is_private: false,
        main_branch: Some("master".into()),
        clone: CloneLinks {
            https: Some(https_url(&identity)),
            ssh: Some(ssh_url(&identity)),
        },
        parent: parent.map(ident),
        html_url: None,
        identity,
    }
}

pub fn proposal(id: u64, source: &str, branch: &str, commit: &CommitId, dest: &str) -> Proposal {
    Proposal {
        id,
        title: "Fix typo".into(),
        author: UserIdentity {
            username: "bob".into(),
            display_name: Some("Bob B.".into()),
        },
        state: ProposalState::Open,
        source: ProposalSource {
            repository: ident(source),
            branch: branch.to_string(),
            commit: commit.clone(),
        },
        destination: ProposalDestination {
            repository: ident(dest),
            branch: "master".into(),
        },
        closed_by: None,
        reason: None,
        html_url: None,
    }
}

#[derive(Default)]
pub struct FakeHost {
    repositories: HashMap<RepositoryIdentity, RepositoryInfo>,
    forks: HashMap<RepositoryIdentity, Vec<RepositoryIdentity>>,
    proposals: HashMap<(RepositoryIdentity, u64), Proposal>,
    branches: HashMap<RepositoryIdentity, BTreeMap<String, CommitId>>,
    pub fail_create: bool,
    pub created: RefCell<Vec<(RepositoryIdentity, NewProposal)>>,
    calls: Cell<usize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&mut self, info: RepositoryInfo) {
        if let Some(parent) = &info.parent {
            self.forks
                .entry(parent.clone())
                .or_default()
                .push(info.identity.clone());
        }
        self.repositories.insert(info.identity.clone(), info);
    }

    /// Register `fork` as a fork of `of` without touching its parent link.
    pub fn add_fork_edge(&mut self, of: &str, fork: &str) {
        self.forks.entry(ident(of)).or_default().push(ident(fork));
    }

    pub fn add_proposal(&mut self, repo: &str, proposal: Proposal) {
        self.proposals.insert((ident(repo), proposal.id), proposal);
    }

    pub fn set_branch(&mut self, repo: &str, branch: &str, head: &CommitId) {
        self.branches
            .entry(ident(repo))
            .or_default()
            .insert(branch.to_string(), head.clone());
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn hit(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn lookup(&self, repo: &RepositoryIdentity) -> Result<RepositoryInfo, HostError> {
        self.repositories
            .get(repo)
            .cloned()
            .ok_or_else(|| HostError::NotFound(format!("repository {repo}")))
    }
}

impl ProposalHost for FakeHost {
    async fn repository(&self, repo: &RepositoryIdentity) -> Result<RepositoryInfo, HostError> {
        self.hit();
        self.lookup(repo)
    }

    async fn forks(&self, repo: &RepositoryIdentity) -> Result<Vec<RepositoryInfo>, HostError> {
        self.hit();
        self.forks
            .get(repo)
            .into_iter()
            .flatten()
            .map(|fork| self.lookup(fork))
            .collect()
    }

    async fn proposal(&self, repo: &RepositoryIdentity, id: u64) -> Result<Proposal, HostError> {
        self.hit();
        self.proposals
            .get(&(repo.clone(), id))
            .cloned()
            .ok_or_else(|| HostError::NotFound(format!("pull request #{id}")))
    }

    async fn branches(
        &self,
        repo: &RepositoryIdentity,
    ) -> Result<BTreeMap<String, CommitId>, HostError> {
        self.hit();
        Ok(self.branches.get(repo).cloned().unwrap_or_default())
    }

    async fn create_proposal(
        &self,
        repo: &RepositoryIdentity,
        request: &NewProposal,
    ) -> Result<Proposal, HostError> {
        self.hit();
        if self.fail_create {
            return Err(HostError::Api {
                status: 500,
                message: "internal server error".into(),
            });
        }
        if request.title.trim().is_empty() {
            return Err(HostError::Validation("title must not be empty".into()));
        }
        self.created
            .borrow_mut()
            .push((repo.clone(), request.clone()));
        let mut created = proposal(
            7,
            &request.source_repository.full_name(),
            &request.source_branch,
            &oid(1),
            &repo.full_name(),
        );
        created.title.clone_from(&request.title);
        created.destination.branch.clone_from(&request.destination_branch);
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// Prompts and editing
// ---------------------------------------------------------------------------

/// Answers prompts from a queue, falling back to the default when empty.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub prompts: Vec<(String, bool)>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            prompts: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        self.prompts.push((prompt.to_string(), default));
        self.answers.pop_front().unwrap_or(default)
    }
}

/// Replaces whatever it is given with fixed text, recording the input.
pub struct ScriptedEditor {
    reply: Option<String>,
    pub seen: Vec<String>,
}

impl ScriptedEditor {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen: Vec::new(),
        }
    }

    /// Hands the text back unchanged.
    pub fn unchanged() -> Self {
        Self {
            reply: None,
            seen: Vec::new(),
        }
    }
}

impl MessageEditor for ScriptedEditor {
    fn edit(&mut self, text: &str) -> Result<String, EngineError> {
        self.seen.push(text.to_string());
        Ok(self.reply.clone().unwrap_or_else(|| text.to_string()))
    }
}

/// Context for a fork `alice/widget` of `acme/widget`.
pub fn fork_context() -> RepositoryContext {
    RepositoryContext {
        root: PathBuf::from("/work/repo"),
        git_dir: PathBuf::from("/work/repo/.git"),
        origin_remote: "origin".into(),
        upstream_remote: "upstream".into(),
        origin: ident("alice/widget"),
        upstream: Some(ident("acme/widget")),
    }
}

/// Context for a repository without an upstream.
pub fn solo_context() -> RepositoryContext {
    RepositoryContext {
        upstream: None,
        ..fork_context()
    }
}
