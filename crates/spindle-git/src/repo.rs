use std::path::{Path, PathBuf};

use spindle_core::GitError;

/// Where a working copy and its git directory live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

/// Find the repository containing `start`.
pub fn discover_repo(start: &Path) -> Result<RepoLocation, GitError> {
    let repo = gix::discover(start).map_err(|_| GitError::NotARepository(start.to_path_buf()))?;
    let git_dir = repo.git_dir().to_path_buf();
    let root = repo
        .work_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| git_dir.clone());
    Ok(RepoLocation { root, git_dir })
}
