//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    forge::types::{
        CreatePrRequest, CreateReleaseRequest, GetPrRequest, PullRequest,
        UpdatePrRequest,
    },
    result::Result,
};

/// Forge operations the workflows depend on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Find the open release PR for a head branch, if any.
    async fn get_open_release_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>>;

    /// Open a new release PR.
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;

    /// Update the title and body of an existing PR.
    async fn update_pr(&self, req: UpdatePrRequest) -> Result<()>;

    /// Create a lightweight tag pointing at a commit.
    async fn tag_commit(&self, tag_name: &str, sha: &str) -> Result<()>;

    /// Create a release object for an existing tag.
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()>;
}
