//! # spindle-config
//!
//! Layered configuration loading for spindle using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SPINDLE_*` prefix, `__` as separator)
//! 2. Repository-local `.spindle.toml` at the working-copy root
//! 3. User-level `~/.config/git-spindle/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SPINDLE_BITBUCKET__USER` -> `bitbucket.user`,
//! `SPINDLE_REMOTES__UPSTREAM` -> `remotes.upstream`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use spindle_config::SpindleConfig;
//!
//! let config = SpindleConfig::load_with_dotenv(None).expect("config");
//! if !config.bitbucket.is_configured() {
//!     eprintln!("set SPINDLE_BITBUCKET__USER and SPINDLE_BITBUCKET__APP_PASSWORD");
//! }
//! ```

mod bitbucket;
mod error;
mod general;
mod remotes;

pub use bitbucket::BitbucketConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, PromptPolicy};
pub use remotes::RemotesConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the repository-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".spindle.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpindleConfig {
    #[serde(default)]
    pub bitbucket: BitbucketConfig,
    #[serde(default)]
    pub remotes: RemotesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SpindleConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `project_root` is the working-copy root whose `.spindle.toml` should be
    /// layered in; `None` skips the local layer.
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        match project_root.map(|root| root.join(".env")) {
            Some(env_path) if env_path.exists() => {
                let _ = dotenvy::from_path(&env_path);
            }
            _ => {
                let _ = dotenvy::dotenv();
            }
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Repository-local config
        if let Some(root) = project_root {
            let local_path = root.join(LOCAL_CONFIG_FILE);
            if local_path.exists() {
                figment = figment.merge(Toml::file(local_path));
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SPINDLE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("git-spindle").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remotes.origin.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remotes.origin".into(),
                reason: "remote name must not be empty".into(),
            });
        }
        if self.remotes.origin == self.remotes.upstream {
            return Err(ConfigError::InvalidValue {
                field: "remotes.upstream".into(),
                reason: "must differ from remotes.origin".into(),
            });
        }
        if self.bitbucket.hosts.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bitbucket.hosts".into(),
                reason: "at least one host is required".into(),
            });
        }
        Ok(())
    }
}
