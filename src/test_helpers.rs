//! Common test helper functions shared across test modules.
use secrecy::SecretString;
use std::path::{Path, PathBuf};

use crate::{cli::Args, config::ActionConfig, forge::config::RemoteConfig};

/// Creates test CLI args with everything empty except defaults.
pub fn create_test_args() -> Args {
    Args {
        github_repo: "".to_string(),
        github_token: "".to_string(),
        npm_token: "".to_string(),
        cwd: "".to_string(),
        tag: "".to_string(),
        prepare_script: "".to_string(),
        setup_git_user: true,
        debug: false,
    }
}

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        path: "test/repo".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a test ActionConfig with the given release tag.
pub fn create_test_config(tag: &str) -> ActionConfig {
    ActionConfig {
        cwd: PathBuf::from("."),
        home: PathBuf::from("."),
        tag: tag.to_string(),
        prepare_script: None,
        setup_git_user: false,
        npm_token: SecretString::from("npm-token".to_string()),
        github_token: SecretString::from("gh-token".to_string()),
    }
}

/// Creates a test ActionConfig rooted at a specific working directory.
pub fn create_test_config_with_cwd(tag: &str, cwd: &Path) -> ActionConfig {
    let mut config = create_test_config(tag);
    config.cwd = cwd.to_path_buf();
    config
}

/// Creates a test ActionConfig with a specific home directory for
/// credential-file assertions.
pub fn create_test_config_with_home(tag: &str, home: &Path) -> ActionConfig {
    let mut config = create_test_config(tag);
    config.home = home.to_path_buf();
    config
}
