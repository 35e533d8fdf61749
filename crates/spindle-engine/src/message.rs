//! Proposal message composition: synthesis from commits, editing, parsing
//! and the backup file written when submission fails.

use std::io::Write;
use std::path::{Path, PathBuf};

use spindle_core::{CommitId, VcsGateway};

use crate::EngineError;

/// Opens a message for the user to edit and returns the edited text.
pub trait MessageEditor {
    fn edit(&mut self, text: &str) -> Result<String, EngineError>;
}

/// Returns the message untouched; used when no editor can be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepMessage;

impl MessageEditor for KeepMessage {
    fn edit(&mut self, text: &str) -> Result<String, EngineError> {
        Ok(text.to_string())
    }
}

/// A proposal title and body on their way to the hosting service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMessage {
    pub title: String,
    pub body: String,
    /// Set when an empty body is legitimate, e.g. reused from a bodiless commit.
    pub accept_empty_body: bool,
}

impl DraftMessage {
    /// Split text into a title (first line) and body (the rest, trimmed).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (title, body) = text.split_once('\n').unwrap_or((text, ""));
        Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            accept_empty_body: false,
        }
    }

    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n\n{}", self.title, self.body)
        }
    }

    /// Reject drafts the hosting service would refuse or that say nothing.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] for an empty title, or an empty body that
    /// was not explicitly accepted.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.title.is_empty() {
            return Err(EngineError::Validation(
                "pull request title must not be empty".into(),
            ));
        }
        if self.body.is_empty() && !self.accept_empty_body {
            return Err(EngineError::Validation(
                "no pull request message given; aborting".into(),
            ));
        }
        Ok(())
    }
}

/// Python-style title case of the last `/` segment, dashes turned into spaces.
///
/// `feature/add-login-page` becomes `Add Login Page`.
pub fn titleize(branch: &str) -> String {
    let segment = branch.rsplit('/').next().unwrap_or(branch);
    let mut title = String::with_capacity(segment.len());
    let mut previous_cased = false;
    for c in segment.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            title.push(c);
            previous_cased = false;
        }
    }
    title.replace('-', " ")
}

/// Default message for `commits` (oldest first) on `branch`.
///
/// A single commit lends its subject and body, and an empty body is then
/// accepted. Several commits yield the titleized branch name and no body.
///
/// # Errors
///
/// Gateway errors reading the commit message.
pub fn synthesize<G: VcsGateway + ?Sized>(
    git: &G,
    branch: &str,
    commits: &[CommitId],
) -> Result<DraftMessage, EngineError> {
    if let [only] = commits {
        let message = git.commit_message(only.as_str())?;
        return Ok(DraftMessage {
            title: message.subject.trim().to_string(),
            accept_empty_body: message.body.trim().is_empty(),
            body: message.body.trim().to_string(),
        });
    }
    Ok(DraftMessage {
        title: titleize(branch),
        body: String::new(),
        accept_empty_body: false,
    })
}

/// Comment block appended below the message in the editor.
pub fn guidance(source: &str, destination: &str, shortlog: &str, diff_stat: &str) -> String {
    let mut text = format!(
        "\n# Requesting a pull to {destination} from {source}\n\
         #\n\
         # Please enter a message to accompany your pull request. Lines starting\n\
         # with '#' will be ignored, and an empty message aborts the request.\n\
         #\n"
    );
    for line in shortlog.lines().chain(diff_stat.lines()) {
        if line.is_empty() {
            text.push_str("#\n");
        } else {
            text.push_str("# ");
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}

/// Drop every line starting with `#`.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Save `text` as `pull-request-message-XXXXXX.txt` inside `dir` and return its path.
///
/// # Errors
///
/// I/O errors creating or writing the file.
pub fn write_backup(dir: &Path, text: &str) -> Result<PathBuf, EngineError> {
    let mut file = tempfile::Builder::new()
        .prefix("pull-request-message-")
        .suffix(".txt")
        .tempfile_in(dir)?;
    file.write_all(text.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::{FakeGit, oid};

    #[rstest]
    #[case("feature/add-login-page", "Add Login Page")]
    #[case("fix-typo", "Fix Typo")]
    #[case("users/bob/v2beta-API", "V2Beta Api")]
    #[case("README", "Readme")]
    fn titleizes_last_segment(#[case] branch: &str, #[case] expected: &str) {
        assert_eq!(titleize(branch), expected);
    }

    #[test]
    fn single_commit_lends_subject_and_empty_body() {
        let mut git = FakeGit::new();
        git.commit(1, &[]);
        git.set_message(1, "Fix typo", "");

        let draft = synthesize(&git, "fix-typo", &[oid(1)]).unwrap();

        assert_eq!(
            draft,
            DraftMessage {
                title: "Fix typo".into(),
                body: String::new(),
                accept_empty_body: true,
            }
        );
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn several_commits_use_branch_name() {
        let git = FakeGit::new();
        git.chain(None, 1, 2);

        let draft = synthesize(&git, "topic/speed-up-parser", &[oid(1), oid(2)]).unwrap();

        assert_eq!(draft.title, "Speed Up Parser");
        assert!(draft.body.is_empty());
        assert!(matches!(draft.validate(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn parse_splits_title_from_body() {
        let draft = DraftMessage::parse("  Add parser\n\nIt parses.\nQuickly.\n\n");
        assert_eq!(draft.title, "Add parser");
        assert_eq!(draft.body, "It parses.\nQuickly.");
    }

    #[test]
    fn comments_are_stripped_after_editing() {
        let edited = format!(
            "Add parser\n\nBody\n{}",
            guidance("alice:topic", "acme:master", "Alice (1):\n  Add parser", " 1 file changed")
        );
        let draft = DraftMessage::parse(&strip_comments(&edited));
        assert_eq!(draft.title, "Add parser");
        assert_eq!(draft.body, "Body");
    }

    #[test]
    fn empty_title_is_invalid_even_when_body_may_be_empty() {
        let draft = DraftMessage {
            accept_empty_body: true,
            ..DraftMessage::default()
        };
        assert!(matches!(draft.validate(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn backup_keeps_message_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_backup(dir.path(), "Title\n\nBody").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pull-request-message-"));
        assert!(name.ends_with(".txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Title\n\nBody");
    }
}
