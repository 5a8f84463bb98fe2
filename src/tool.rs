//! Narrow interface over the external changesets CLI.
//!
//! The versioning and publish tools are invoked as child processes; this
//! module isolates the shell-out and the textual publish-output parsing
//! behind a trait so workflows can be tested against fixture strings.
use async_trait::async_trait;
use log::*;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::LATEST_TAG,
    exec::{self, CommandOutput},
    result::Result,
};

/// A package the publish tool reported as newly published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedPackage {
    pub name: String,
    pub version: String,
}

/// Terminal artifact of the publish workflow.
#[derive(Debug, Clone, Default)]
pub struct PublishResult {
    pub published: bool,
    pub published_packages: Vec<PublishedPackage>,
}

/// External versioning and publish tool invocations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChangesetCli: Send + Sync {
    /// Apply pending changesets: bump manifest versions, regenerate
    /// changelogs, delete consumed changeset files.
    async fn version(&self) -> Result<CommandOutput>;

    /// Publish updated packages to the registry for the given channel,
    /// reporting per-package outcome via stdout.
    async fn publish(&self, channel: &str) -> Result<CommandOutput>;
}

/// Real implementation shelling out to `npx changeset`.
pub struct NpxChangesetCli {
    cwd: PathBuf,
}

impl NpxChangesetCli {
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

#[async_trait]
impl ChangesetCli for NpxChangesetCli {
    async fn version(&self) -> Result<CommandOutput> {
        exec::exec_checked("npx", &["changeset", "version"], &self.cwd).await
    }

    async fn publish(&self, channel: &str) -> Result<CommandOutput> {
        // "latest" is the registry default dist-tag
        if channel == LATEST_TAG {
            exec::exec_checked("npx", &["changeset", "publish"], &self.cwd)
                .await
        } else {
            exec::exec_checked(
                "npx",
                &["changeset", "publish", "--tag", channel],
                &self.cwd,
            )
            .await
        }
    }
}

/// Recover newly published packages from the publish tool's stdout.
///
/// A line whose tail is `name@semver` (after a `<context>: ` prefix) marks a
/// newly published package. Packages already at their current version carry
/// an `(already published)` trailer and fall out of the pattern, as do lines
/// that don't match at all, which are skipped silently.
pub fn parse_published_packages(stdout: &str) -> Result<Vec<PublishedPackage>> {
    let re = Regex::new(
        r"^.+:\s*(?P<name>@?[\w.-]+(?:/[\w.-]+)?)@(?P<version>\d[\w.+-]*)\s*$",
    )?;

    let mut packages = vec![];

    for line in stdout.lines() {
        let Some(captures) = re.captures(line.trim()) else {
            debug!("skipping publish output line: {line}");
            continue;
        };

        let version = captures["version"].to_string();

        if semver::Version::parse(&version).is_err() {
            debug!("skipping line with non-semver version: {line}");
            continue;
        }

        packages.push(PublishedPackage {
            name: captures["name"].to_string(),
            version,
        });
    }

    Ok(packages)
}
