//! Names of the fork ("origin") and parent ("upstream") remotes.

use serde::{Deserialize, Serialize};

fn default_origin() -> String {
    String::from("origin")
}

fn default_upstream() -> String {
    String::from("upstream")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemotesConfig {
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_upstream")]
    pub upstream: String,
}

impl Default for RemotesConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            upstream: default_upstream(),
        }
    }
}
