//! Configuration for the forge connection.
use secrecy::SecretString;

use crate::{
    forge::{github::Github, traits::Forge},
    result::Result,
};

/// Branch name prefix for the release PR branch. The base branch name is
/// appended, giving a deterministic branch per release channel.
pub const RELEASE_BRANCH_PREFIX: &str = "changeset-release";

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path.
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

/// Supported forge platforms.
#[derive(Debug, Clone)]
pub enum Remote {
    Github(RemoteConfig),
}

impl Remote {
    /// Create forge client instance for the configured platform.
    pub fn get_forge(&self) -> Result<Box<dyn Forge>> {
        match self {
            Remote::Github(config) => {
                let forge = Github::new(config.clone())?;
                Ok(Box::new(forge))
            }
        }
    }

    /// Borrow the underlying remote configuration.
    pub fn config(&self) -> &RemoteConfig {
        match self {
            Remote::Github(config) => config,
        }
    }
}

/// Release branch name for a base branch.
pub fn release_branch_name(base_branch: &str) -> String {
    format!("{RELEASE_BRANCH_PREFIX}/{base_branch}")
}
