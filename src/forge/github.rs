//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, params, params::repos::Reference};
use reqwest::StatusCode;

use crate::{
    error::ActionError,
    forge::{
        config::RemoteConfig,
        traits::Forge,
        types::{
            CreatePrRequest, CreateReleaseRequest, GetPrRequest, PullRequest,
            UpdatePrRequest,
        },
    },
    result::Result,
};

/// GitHub forge implementation using Octocrab for PR, tag, and release
/// operations.
#[derive(Debug)]
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration. No network call is made until the first
    /// operation.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())
            .map_err(ActionError::from)?;
        let instance = builder.build().map_err(ActionError::from)?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn is_reference_conflict(err: &octocrab::Error) -> bool {
        matches!(
            err,
            octocrab::Error::GitHub { source, .. }
                if source.status_code == StatusCode::UNPROCESSABLE_ENTITY
        )
    }
}

#[async_trait]
impl Forge for Github {
    async fn get_open_release_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>> {
        let head = format!("{}:{}", self.config.owner, req.head_branch);

        let prs = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Open)
            .head(head)
            .base(req.base_branch)
            .send()
            .await
            .map_err(ActionError::from)?;

        Ok(prs.into_iter().next().map(|pr| PullRequest {
            number: pr.number,
            sha: pr.head.sha,
        }))
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.head_branch, req.base_branch)
            .body(req.body)
            .send()
            .await
            .map_err(ActionError::from)?;

        Ok(PullRequest {
            number: pr.number,
            sha: pr.head.sha,
        })
    }

    async fn update_pr(&self, req: UpdatePrRequest) -> Result<()> {
        self.instance
            .pulls(&self.config.owner, &self.config.repo)
            .update(req.pr_number)
            .title(req.title)
            .body(req.body)
            .send()
            .await
            .map_err(ActionError::from)?;

        Ok(())
    }

    async fn tag_commit(&self, tag_name: &str, sha: &str) -> Result<()> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Tag(tag_name.to_string()), sha)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if Self::is_reference_conflict(&err) => {
                info!("tag {tag_name} already exists: updating");

                let endpoint = format!(
                    "{}/repos/{}/{}/git/refs/tags/{}",
                    self.base_uri,
                    self.config.owner,
                    self.config.repo,
                    tag_name
                );

                let _: serde_json::Value = self
                    .instance
                    .patch(
                        endpoint,
                        Some(&serde_json::json!({
                          "sha": sha,
                          "force": true
                        })),
                    )
                    .await
                    .map_err(ActionError::from)?;

                Ok(())
            }
            Err(err) => Err(ActionError::forge(format!(
                "failed to create tag {tag_name}: {err}"
            ))
            .into()),
        }
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.tag)
            .body(&req.notes)
            .target_commitish(&req.sha)
            .draft(false)
            .prerelease(false)
            .send()
            .await
            .map_err(ActionError::from)?;

        Ok(())
    }
}
