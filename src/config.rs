//! Explicit run configuration threaded through each workflow component.
//!
//! The reference action passed credentials and options around via the process
//! environment and working directory. Here everything a component needs is
//! collected once, up front, so no step reads ambient state.

use secrecy::SecretString;
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{cli, error::ActionError, result::Result};

/// Release channel that maps to the registry's default dist-tag.
pub const LATEST_TAG: &str = "latest";

/// Fully resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Working directory holding the repository checkout.
    pub cwd: PathBuf,
    /// Home directory receiving credential files.
    pub home: PathBuf,
    /// Release channel tag. Empty until validated, which happens before any
    /// mutating step once changesets are known to exist.
    pub tag: String,
    /// Optional command run between versioning and publishing.
    pub prepare_script: Option<String>,
    /// Whether to configure the bot commit identity.
    pub setup_git_user: bool,
    /// Registry auth token.
    pub npm_token: SecretString,
    /// Git-host auth token.
    pub github_token: SecretString,
}

impl ActionConfig {
    /// Resolve configuration from CLI arguments and the environment. Fails on
    /// any missing required credential so later steps can assume both tokens
    /// are present.
    pub fn from_args(args: &cli::Args, github_token: SecretString) -> Result<Self> {
        let npm_token = args.get_npm_token()?;

        let cwd = if args.cwd.is_empty() {
            env::current_dir()?
        } else {
            PathBuf::from(&args.cwd)
        };

        let home = env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| ActionError::missing_input("HOME"))?;

        let prepare_script = if args.prepare_script.trim().is_empty() {
            None
        } else {
            Some(args.prepare_script.clone())
        };

        Ok(Self {
            cwd,
            home,
            tag: args.tag.clone(),
            prepare_script,
            setup_git_user: args.setup_git_user,
            npm_token,
            github_token,
        })
    }

    /// Validate the release channel tag, required once changesets exist. Runs
    /// before any filesystem or git mutation.
    pub fn require_tag(&self) -> Result<&str> {
        if self.tag.is_empty() {
            return Err(ActionError::MissingReleaseTag.into());
        }
        Ok(&self.tag)
    }

    /// Whether the configured channel maps to the registry default.
    pub fn is_latest_channel(&self) -> bool {
        self.tag == LATEST_TAG
    }

    /// Borrow the working directory as a path.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers;

    #[test]
    fn require_tag_rejects_empty_tag() {
        let config = test_helpers::create_test_config("");
        assert!(config.require_tag().is_err());
    }

    #[test]
    fn require_tag_accepts_configured_tag() {
        let config = test_helpers::create_test_config("next");
        assert_eq!(config.require_tag().unwrap(), "next");
        assert!(!config.is_latest_channel());
    }

    #[test]
    fn latest_channel_is_detected() {
        let config = test_helpers::create_test_config(LATEST_TAG);
        assert!(config.is_latest_channel());
    }

    #[test]
    fn from_args_requires_npm_token() {
        let mut args = test_helpers::create_test_args();
        args.npm_token = "".to_string();
        // guard against ambient credentials leaking into the test
        if std::env::var("NPM_TOKEN").is_ok() {
            return;
        }

        let result = ActionConfig::from_args(
            &args,
            SecretString::from("gh-token".to_string()),
        );
        assert!(result.is_err());
    }
}
