use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Runtime configuration for git-release.
///
/// Selects the remote and branch the release runs against and the message
/// used when pending work is committed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

/// Returns the default remote name.
fn default_remote() -> String {
    "origin".to_string()
}

/// Returns the default release branch.
fn default_branch() -> String {
    "main".to_string()
}

/// Returns the default release commit message.
fn default_commit_message() -> String {
    "chore: release pending changes".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            branch: default_branch(),
            commit_message: default_commit_message(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("invalid configuration file: {}", e)))?;
    Ok(config)
}

/// Applies `GIT_REMOTE` and `GIT_BRANCH` overrides from the environment.
///
/// Empty values are treated as unset. Command-line flags are applied by the
/// caller afterwards, so the precedence is flag > environment > file.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(remote) = env::var("GIT_REMOTE") {
        if !remote.is_empty() {
            config.remote = remote;
        }
    }
    if let Ok(branch) = env::var("GIT_BRANCH") {
        if !branch.is_empty() {
            config.branch = branch;
        }
    }
}
