//! General behaviour settings.

use serde::{Deserialize, Serialize};
use spindle_core::CloneProtocol;

/// How confirmation prompts are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptPolicy {
    /// Ask on the terminal.
    #[default]
    Interactive,
    /// Take each prompt's default answer without asking.
    AcceptDefaults,
    Yes,
    No,
}

const fn default_edit() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub prompt: PromptPolicy,

    #[serde(default)]
    pub clone_protocol: CloneProtocol,

    /// Open the editor on synthesized proposal messages.
    #[serde(default = "default_edit")]
    pub edit: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            prompt: PromptPolicy::default(),
            clone_protocol: CloneProtocol::default(),
            edit: default_edit(),
        }
    }
}
