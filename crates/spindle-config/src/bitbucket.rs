//! Bitbucket Cloud connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_api_root() -> String {
    String::from("https://api.bitbucket.org/2.0")
}

fn default_hosts() -> Vec<String> {
    vec![
        String::from("bitbucket.org"),
        String::from("www.bitbucket.org"),
    ]
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BitbucketConfig {
    /// REST API root, without a trailing slash.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Login name; also decides which repositories count as "mine".
    #[serde(default)]
    pub user: String,

    /// App password used for basic authentication.
    #[serde(default)]
    pub app_password: String,

    /// Hostnames whose remote URLs belong to this service.
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BitbucketConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            user: String::new(),
            app_password: String::new(),
            hosts: default_hosts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BitbucketConfig {
    /// Check if credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.user.is_empty() && !self.app_password.is_empty()
    }

    /// Fail with [`ConfigError::MissingCredentials`] naming each absent field.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            ("bitbucket.user", self.user.is_empty()),
            ("bitbucket.app_password", self.app_password.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredentials { missing })
        }
    }

    /// API root with any trailing slash removed.
    pub fn api_root(&self) -> &str {
        self.api_root.trim_end_matches('/')
    }
}
