use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use spindle_core::{CommitId, CommitMessage, GitError, VcsGateway};

use crate::repo::{RepoLocation, discover_repo};

/// [`VcsGateway`] over a local working copy.
#[derive(Debug, Clone)]
pub struct GitGateway {
    root: PathBuf,
    git_dir: PathBuf,
}

impl GitGateway {
    /// Open the repository containing `start`.
    pub fn discover(start: &Path) -> Result<Self, GitError> {
        let RepoLocation { root, git_dir } = discover_repo(start)?;
        Ok(Self { root, git_dir })
    }

    /// Re-open on every call so refs and packs written by the `git` binary
    /// in between are always visible.
    fn open(&self) -> Result<gix::Repository, GitError> {
        gix::open(&self.git_dir).map_err(|e| GitError::Gix(format!("open repository: {e}")))
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.root);
        command
    }

    /// Run a git command and return its stdout, failing on non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(args = %args.join(" "), "git");
        let output = self.command(args).output()?;
        check_output(args, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a git command with its progress streamed to the terminal.
    fn run_visible(&self, args: &[&str]) -> Result<(), GitError> {
        tracing::debug!(args = %args.join(" "), "git (visible)");
        let output = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            eprint!("{stderr}");
        }
        check_output(args, &output)
    }

    fn parse_commit_lines(stdout: &str) -> Result<Vec<CommitId>, GitError> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.parse::<CommitId>().map_err(GitError::from))
            .collect()
    }
}

fn check_output(args: &[&str], output: &Output) -> Result<(), GitError> {
    if output.status.success() {
        return Ok(());
    }
    Err(GitError::Command {
        command: format!("git {}", args.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

impl VcsGateway for GitGateway {
    fn root(&self) -> &Path {
        &self.root
    }

    fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn resolve(&self, rev: &str) -> Result<Option<CommitId>, GitError> {
        let repo = self.open()?;
        let spec = format!("{rev}^{{commit}}");
        match repo.rev_parse_single(spec.as_str()) {
            Ok(id) => Ok(Some(id.detach().to_string().parse()?)),
            Err(error) => {
                tracing::debug!(rev, %error, "revision does not resolve");
                Ok(None)
            }
        }
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool, GitError> {
        let args = [
            "merge-base",
            "--is-ancestor",
            ancestor.as_str(),
            descendant.as_str(),
        ];
        let output = self.command(&args).output()?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitError::Command {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        let repo = self.open()?;
        let head = repo
            .head()
            .map_err(|e| GitError::Gix(format!("read HEAD: {e}")))?;
        if head.is_detached() {
            return Ok(None);
        }
        Ok(head.referent_name().map(|name| name.shorten().to_string()))
    }

    fn update_ref(&self, name: &str, target: &CommitId) -> Result<(), GitError> {
        let repo = self.open()?;
        let oid: gix::ObjectId = target
            .as_str()
            .parse()
            .map_err(|e| GitError::Gix(format!("parse object id: {e}")))?;

        repo.edit_reference(gix::refs::transaction::RefEdit {
            change: gix::refs::transaction::Change::Update {
                log: gix::refs::transaction::LogChange {
                    mode: gix::refs::transaction::RefLog::AndReference,
                    force_create_reflog: false,
                    message: "spindle: track pull request".into(),
                },
                expected: gix::refs::transaction::PreviousValue::Any,
                new: gix::refs::Target::Object(oid),
            },
            name: name
                .try_into()
                .map_err(|e| GitError::Gix(format!("invalid ref name '{name}': {e}")))?,
            deref: false,
        })
        .map_err(|e| GitError::Gix(format!("update {name}: {e}")))?;

        Ok(())
    }

    fn fetch(&self, url: &str, refspec: &str) -> Result<(), GitError> {
        self.run_visible(&["fetch", url, refspec])
    }

    fn fetch_remote(&self, remote: &str, with_tags: bool) -> Result<(), GitError> {
        if with_tags {
            self.run_visible(&["fetch", "--tags", remote])
        } else {
            self.run_visible(&["fetch", remote])
        }
    }

    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>, GitError> {
        let stdout = self.run(&["ls-remote", "--refs", "--quiet", "--heads", "--tags", url])?;
        Ok(stdout
            .lines()
            .filter_map(|line| line.split_once('\t').map(|(_, name)| name.trim().to_string()))
            .filter(|name| !name.is_empty())
            .collect())
    }

    fn push(&self, remote: &str, branch: &str, force: bool) -> Result<(), GitError> {
        if force {
            self.run_visible(&["push", "--force", remote, branch])
        } else {
            self.run_visible(&["push", remote, branch])
        }
    }

    fn merge_fast_forward_only(&self, rev: &str) -> Result<(), GitError> {
        self.run_visible(&["merge", "--ff-only", rev])
    }

    fn cherry_pick_range(
        &self,
        from_exclusive: &CommitId,
        to_inclusive: &CommitId,
    ) -> Result<(), GitError> {
        let range = format!("{from_exclusive}..{to_inclusive}");
        match self.run_visible(&["cherry-pick", &range]) {
            Ok(()) => Ok(()),
            Err(error) if self.git_dir.join("CHERRY_PICK_HEAD").exists() => {
                tracing::debug!(%error, "cherry-pick stopped on a conflict");
                Err(GitError::Conflict {
                    command: format!("git cherry-pick {range}"),
                })
            }
            Err(error) => Err(error),
        }
    }

    fn commit_range(
        &self,
        from_exclusive: &str,
        to_inclusive: &str,
    ) -> Result<Vec<CommitId>, GitError> {
        let range = format!("{from_exclusive}..{to_inclusive}");
        let stdout = self.run(&["rev-list", "--reverse", &range])?;
        Self::parse_commit_lines(&stdout)
    }

    fn commit_message(&self, rev: &str) -> Result<CommitMessage, GitError> {
        let stdout = self.run(&["log", "-1", "--pretty=format:%s%n%b", rev])?;
        let (subject, body) = stdout.split_once('\n').unwrap_or((stdout.as_str(), ""));
        Ok(CommitMessage {
            subject: subject.trim().to_string(),
            body: body.trim().to_string(),
        })
    }

    fn tracking_branch(&self, branch: &str) -> Result<Option<String>, GitError> {
        let spec = format!("{branch}@{{u}}");
        match self.run(&["rev-parse", "--abbrev-ref", &spec]) {
            Ok(stdout) => {
                let name = stdout.trim();
                Ok((!name.is_empty()).then(|| name.to_string()))
            }
            Err(GitError::Command { stderr, .. }) => {
                tracing::debug!(branch, %stderr, "no upstream configured");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn remotes(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.run(&["remote"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>, GitError> {
        let repo = self.open()?;
        let key = format!("remote.{remote}.url");
        Ok(repo
            .config_snapshot()
            .string(key.as_str())
            .map(|value| value.to_string()))
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.run(&["remote", "add", name, url]).map(|_| ())
    }

    fn shortlog(&self, range: &str) -> Result<String, GitError> {
        self.run(&["shortlog", range])
    }

    fn diff_stat(&self, range: &str) -> Result<String, GitError> {
        self.run(&["diff", "--stat", range])
    }
}
