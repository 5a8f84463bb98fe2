//! Credential and commit-identity setup.
//!
//! Writes the files the external CLIs expect before any shell-out that needs
//! them: an `.npmrc` for the registry, a `.netrc` for authenticated git
//! pushes, and optionally the github-actions bot commit identity. Every write
//! failure is fatal since credentials are a hard precondition for the rest of
//! the run.
use log::*;
use secrecy::ExposeSecret;
use std::path::Path;
use tokio::fs;

use crate::{config::ActionConfig, exec, result::Result};

const BOT_NAME: &str = "github-actions[bot]";
const BOT_EMAIL: &str =
    "41898282+github-actions[bot]@users.noreply.github.com";

/// Write all credential files and, if configured, the bot commit identity.
pub async fn configure_environment(config: &ActionConfig) -> Result<()> {
    if config.setup_git_user {
        info!("setting git user");
        setup_git_user(config.cwd()).await?;
    }

    configure_npmrc(config).await?;

    info!("setting GitHub credentials");
    configure_netrc(config).await?;

    Ok(())
}

/// Configure the github-actions bot as the commit author.
async fn setup_git_user(cwd: &Path) -> Result<()> {
    exec::exec_checked("git", &["config", "user.name", BOT_NAME], cwd)
        .await?;
    exec::exec_checked("git", &["config", "user.email", BOT_EMAIL], cwd)
        .await?;

    Ok(())
}

/// Write the registry auth token to `$HOME/.npmrc` unless the user already
/// provided one.
async fn configure_npmrc(config: &ActionConfig) -> Result<()> {
    let npmrc_path = config.home.join(".npmrc");

    if fs::try_exists(&npmrc_path).await? {
        info!("found existing .npmrc file, skipping npm token setup");
        return Ok(());
    }

    info!("writing .npmrc file");

    let contents = format!(
        "//registry.npmjs.org/:_authToken={}\n",
        config.npm_token.expose_secret()
    );

    fs::write(&npmrc_path, contents).await?;

    Ok(())
}

/// Write git-host credentials to `$HOME/.netrc` so authenticated pushes work.
async fn configure_netrc(config: &ActionConfig) -> Result<()> {
    let netrc_path = config.home.join(".netrc");

    let contents = format!(
        "machine github.com\nlogin {BOT_NAME}\npassword {}\n",
        config.github_token.expose_secret()
    );

    fs::write(&netrc_path, contents).await?;

    Ok(())
}
