use std::path::PathBuf;
use std::process::Command;

use spindle_engine::{EngineError, MessageEditor};

const EDIT_FILE: &str = "PULLREQ_EDITMSG";

/// Edits proposal messages in the editor git itself would use.
///
/// The text is written to `<git_dir>/PULLREQ_EDITMSG`, the editor named by
/// `git var GIT_EDITOR` is run on it through the shell, and the file is read
/// back once the editor exits.
pub struct GitEditor {
    root: PathBuf,
    git_dir: PathBuf,
}

impl GitEditor {
    pub const fn new(root: PathBuf, git_dir: PathBuf) -> Self {
        Self { root, git_dir }
    }

    fn editor_command(&self) -> Result<String, EngineError> {
        let output = Command::new("git")
            .args(["var", "GIT_EDITOR"])
            .current_dir(&self.root)
            .output()?;
        let editor = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || editor.is_empty() {
            return Err(EngineError::Validation(
                "no editor configured; set GIT_EDITOR or core.editor".into(),
            ));
        }
        Ok(editor)
    }
}

impl MessageEditor for GitEditor {
    fn edit(&mut self, text: &str) -> Result<String, EngineError> {
        let path = self.git_dir.join(EDIT_FILE);
        std::fs::write(&path, text)?;

        let editor = self.editor_command()?;
        tracing::debug!(%editor, path = %path.display(), "opening editor");
        let status = Command::new("sh")
            .arg("-c")
            .arg(format!("{editor} \"$@\""))
            .arg(&editor)
            .arg(&path)
            .current_dir(&self.root)
            .status()?;
        if !status.success() {
            return Err(EngineError::Validation(format!(
                "editor exited with {status}; pull request aborted"
            )));
        }

        Ok(std::fs::read_to_string(&path)?)
    }
}
