//! Version workflow: apply pending changesets and manage the release PR.
use log::*;

use crate::{
    changelog,
    config::ActionConfig,
    forge::{
        config::release_branch_name,
        traits::Forge,
        types::{CreatePrRequest, GetPrRequest, UpdatePrRequest},
    },
    manifest::{self, BumpedPackage, ManifestSnapshot},
    repo::GitOps,
    result::Result,
    tool::ChangesetCli,
};

const PR_PREAMBLE: &str = "\
This PR was opened by the changesets release action. When you're ready to do \
a release, you can merge this and the packages will be published to the \
registry automatically. If you're not ready to do a release yet, that's fine: \
whenever you add more changesets, this PR will be updated.";

/// Result of the version workflow, consumed by the publish workflow for
/// changelog lookup.
#[derive(Debug)]
pub struct VersionOutcome {
    /// Packages the versioning tool bumped.
    pub bumped: Vec<BumpedPackage>,
    /// Manifest snapshot taken after the tool ran.
    pub snapshot: ManifestSnapshot,
}

/// Run the versioning tool on a dedicated release branch and create or
/// update the "Version Packages" PR from the resulting manifest diff.
pub async fn execute(
    config: &ActionConfig,
    forge: &dyn Forge,
    tool: &dyn ChangesetCli,
    git: &dyn GitOps,
) -> Result<VersionOutcome> {
    let base_branch = git.current_branch().await?;
    let base_sha = git.head_sha().await?;
    let release_branch = release_branch_name(&base_branch);

    info!("switching to release branch: {release_branch}");
    git.switch_to_branch(&release_branch).await?;
    git.reset_hard(&base_sha).await?;

    let before = manifest::snapshot(config.cwd())?;

    info!("running versioning tool");
    tool.version().await?;

    let after = manifest::snapshot(config.cwd())?;
    let bumped = manifest::diff(&before, &after);

    if bumped.is_empty() {
        // the tool found nothing to apply: leave any existing PR untouched
        info!("versioning tool reported no changes: skipping release PR");
        return Ok(VersionOutcome {
            bumped,
            snapshot: after,
        });
    }

    let title = pr_title(&config.tag, config.is_latest_channel());
    let body = pr_body(&bumped);

    info!("committing version changes for {} packages", bumped.len());
    git.commit_all(&title).await?;
    git.force_push(&release_branch).await?;

    info!("searching for existing pr for branch {release_branch}");
    let existing_pr = forge
        .get_open_release_pr(GetPrRequest {
            head_branch: release_branch.clone(),
            base_branch: base_branch.clone(),
        })
        .await?;

    if let Some(pr) = existing_pr {
        forge
            .update_pr(UpdatePrRequest {
                pr_number: pr.number,
                title,
                body,
            })
            .await?;
        info!("updated existing release pr: {}", pr.number);
    } else {
        let pr = forge
            .create_pr(CreatePrRequest {
                head_branch: release_branch,
                base_branch,
                title,
                body,
            })
            .await?;
        info!("created release pr: {}", pr.number);
    }

    Ok(VersionOutcome {
        bumped,
        snapshot: after,
    })
}

/// Fixed title convention, suffixed with the channel for non-default tags.
fn pr_title(tag: &str, is_latest: bool) -> String {
    if is_latest {
        "Version Packages".to_string()
    } else {
        format!("Version Packages ({tag})")
    }
}

/// Human-readable description listing each bumped package and its changelog
/// excerpt for the new version.
fn pr_body(bumped: &[BumpedPackage]) -> String {
    let mut sections = vec![PR_PREAMBLE.to_string(), "# Releases".to_string()];

    for package in bumped {
        let entry = changelog::read_entry(&package.dir, &package.new_version);

        sections.push(format!(
            "## {}@{}\n\n{}",
            package.name, package.new_version, entry
        ));
    }

    sections.join("\n\n")
}
