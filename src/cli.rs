//! CLI argument parsing and forge connection configuration.
use clap::Parser;
use color_eyre::eyre::{ContextCompat, eyre};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    forge::config::{Remote, RemoteConfig},
    result::Result,
};

/// CLI arguments mirroring the action's workflow inputs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "")]
    /// GitHub access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "")]
    /// npm registry auth token. Falls back to NPM_TOKEN env var.
    pub npm_token: String,

    #[arg(long, default_value = "")]
    /// Working directory override. Defaults to the current directory.
    pub cwd: String,

    #[arg(long, default_value = "")]
    /// Release channel tag (e.g. "latest", "next"). Required once
    /// changesets exist.
    pub tag: String,

    #[arg(long, default_value = "")]
    /// Optional command run between versioning and publishing, split on
    /// whitespace.
    pub prepare_script: String,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    /// Configure the github-actions bot commit identity before running.
    pub setup_git_user: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<Remote> {
        if self.github_repo.is_empty() {
            return Err(eyre!("must configure a github repo"));
        }

        get_github_remote(&self.github_repo, &self.github_token)
    }

    /// Resolve the npm registry token from the flag or NPM_TOKEN env var.
    pub fn get_npm_token(&self) -> Result<SecretString> {
        let mut token = self.npm_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("NPM_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(eyre!(
                "Please add the NPM_TOKEN to the changesets action"
            ));
        }

        Ok(SecretString::from(token))
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(eyre!(
            "only http and https schemes are supported for repo urls"
        )),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(github_repo: &str, github_token: &str) -> Result<Remote> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(eyre!(
            "Please add the GITHUB_TOKEN to the changesets action"
        ));
    }

    let host = parsed
        .host
        .ok_or(eyre!("unable to parse host from github repo"))?;

    let owner = parsed
        .owner
        .ok_or(eyre!("unable to parse owner from github repo"))?;

    let project_path = parsed
        .path
        .strip_prefix("/")
        .wrap_err("failed to process project path")?
        .to_string();

    let remote_config = RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        token: SecretString::from(token),
    };

    Ok(Remote::Github(remote_config))
}
