//! Publish workflow: push packages to the registry, then tag and release.
use log::*;

use crate::{
    changelog,
    config::ActionConfig,
    forge::{traits::Forge, types::CreateReleaseRequest},
    manifest::ManifestSnapshot,
    repo::GitOps,
    result::Result,
    tool::{self, ChangesetCli, PublishResult},
};

/// Invoke the publish tool and create a tag and release object for every
/// package it reports as newly published. Re-running against an
/// already-published version set is not an error: the tool reports everything
/// as already published and the result is empty.
pub async fn execute(
    config: &ActionConfig,
    forge: &dyn Forge,
    tool: &dyn ChangesetCli,
    git: &dyn GitOps,
    snapshot: &ManifestSnapshot,
) -> Result<PublishResult> {
    let channel = config.require_tag()?;

    info!("running publish tool for channel: {channel}");
    let output = tool.publish(channel).await?;

    let packages = tool::parse_published_packages(&output.stdout)?;

    if packages.is_empty() {
        info!("no packages were published");
        return Ok(PublishResult::default());
    }

    let sha = git.head_sha().await?;

    for package in &packages {
        let tag = format!("{}@{}", package.name, package.version);

        let notes = snapshot
            .get(&package.name)
            .map(|info| changelog::read_entry(&info.dir, &package.version))
            .unwrap_or_default();

        info!("creating tag: {tag}");
        forge.tag_commit(&tag, &sha).await?;

        info!("creating release: {tag}");
        forge
            .create_release(CreateReleaseRequest {
                tag,
                sha: sha.clone(),
                notes,
            })
            .await?;
    }

    Ok(PublishResult {
        published: true,
        published_packages: packages,
    })
}
