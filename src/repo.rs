//! Git repository operations for release branch management.
//!
//! The git binary is an external collaborator: it is invoked, not
//! reimplemented. Pushes authenticate through the `.netrc` written during
//! credential setup. Operations are behind a trait so the workflows can be
//! tested without a live checkout.
use async_trait::async_trait;
use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::{exec, result::Result};

/// Git operations the workflows depend on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GitOps: Send + Sync {
    /// Name of the currently checked-out branch.
    async fn current_branch(&self) -> Result<String>;

    /// Sha of the current HEAD commit.
    async fn head_sha(&self) -> Result<String>;

    /// Switch to a branch, creating it if it does not exist yet.
    async fn switch_to_branch(&self, branch: &str) -> Result<()>;

    /// Hard-reset the working tree to a commit.
    async fn reset_hard(&self, sha: &str) -> Result<()>;

    /// Stage everything and commit.
    async fn commit_all(&self, message: &str) -> Result<()>;

    /// Force-push a branch to origin.
    async fn force_push(&self, branch: &str) -> Result<()>;
}

/// System-git implementation operating on an existing checkout.
pub struct GitCli {
    cwd: PathBuf,
}

impl GitCli {
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

#[async_trait]
impl GitOps for GitCli {
    async fn current_branch(&self) -> Result<String> {
        let output = exec::exec_checked(
            "git",
            &["rev-parse", "--abbrev-ref", "HEAD"],
            &self.cwd,
        )
        .await?;

        Ok(output.stdout.trim().to_string())
    }

    async fn head_sha(&self) -> Result<String> {
        let output =
            exec::exec_checked("git", &["rev-parse", "HEAD"], &self.cwd)
                .await?;

        Ok(output.stdout.trim().to_string())
    }

    async fn switch_to_branch(&self, branch: &str) -> Result<()> {
        let checkout =
            exec::exec_with_output("git", &["checkout", branch], &self.cwd)
                .await?;

        if !checkout.success() {
            exec::exec_checked("git", &["checkout", "-b", branch], &self.cwd)
                .await?;
        }

        Ok(())
    }

    async fn reset_hard(&self, sha: &str) -> Result<()> {
        exec::exec_checked("git", &["reset", "--hard", sha], &self.cwd)
            .await?;

        Ok(())
    }

    async fn commit_all(&self, message: &str) -> Result<()> {
        exec::exec_checked("git", &["add", "-A"], &self.cwd).await?;
        exec::exec_checked("git", &["commit", "-m", message], &self.cwd)
            .await?;

        Ok(())
    }

    async fn force_push(&self, branch: &str) -> Result<()> {
        exec::exec_checked(
            "git",
            &["push", "origin", branch, "--force"],
            &self.cwd,
        )
        .await?;

        Ok(())
    }
}
