//! Pending changeset discovery and parsing.
//!
//! Changesets are contributor-authored markdown files under `.changeset/`,
//! each carrying a frontmatter block naming affected packages and bump kinds,
//! followed by a free-text summary. They are consumed (and deleted) by the
//! external versioning tool; this module only reads them to decide whether a
//! release is pending.
use log::*;
use std::path::Path;
use tokio::fs;

use crate::{error::ActionError, result::Result};

/// Directory holding pending changeset files, relative to the working dir.
pub const CHANGESET_DIR: &str = ".changeset";

/// Semantic-version bump kind declared by a changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl std::str::FromStr for BumpKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(format!("unknown bump kind: {other}")),
        }
    }
}

/// Single package bump declared by a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRelease {
    pub package: String,
    pub bump: BumpKind,
}

/// A pending release note parsed from one changeset file.
#[derive(Debug, Clone)]
pub struct Changeset {
    /// File stem, e.g. "brave-pandas-smile".
    pub id: String,
    /// Free-text summary below the frontmatter.
    pub summary: String,
    /// Affected packages and their bump kinds.
    pub releases: Vec<ChangesetRelease>,
}

/// Release-intent summary for one run.
#[derive(Debug, Clone, Default)]
pub struct ChangesetState {
    pub changesets: Vec<Changeset>,
}

impl ChangesetState {
    pub fn has_changesets(&self) -> bool {
        !self.changesets.is_empty()
    }
}

/// Scan the working directory for pending changesets. A missing `.changeset`
/// directory or zero descriptors is the normal no-changesets state, not an
/// error.
pub async fn read_changeset_state(cwd: &Path) -> Result<ChangesetState> {
    let dir = cwd.join(CHANGESET_DIR);

    if !fs::try_exists(&dir).await? {
        debug!("no {CHANGESET_DIR} directory found");
        return Ok(ChangesetState::default());
    }

    let mut paths = vec![];
    let mut entries = fs::read_dir(&dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();

        let is_changeset = path.extension().is_some_and(|e| e == "md")
            && path.file_name().is_some_and(|n| n != "README.md");

        if is_changeset {
            paths.push(path);
        }
    }

    // deterministic order regardless of readdir order
    paths.sort();

    let mut changesets = vec![];

    for path in paths {
        let content = fs::read_to_string(&path).await?;
        changesets.push(parse_changeset(&path, &content)?);
    }

    debug!("found {} pending changesets", changesets.len());

    Ok(ChangesetState { changesets })
}

/// Parse a single changeset file: a `---` fenced frontmatter block of
/// `"name": bump` lines followed by the summary text.
fn parse_changeset(path: &Path, content: &str) -> Result<Changeset> {
    let display_path = path.display().to_string();

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let rest = content.trim_start().strip_prefix("---").ok_or_else(|| {
        ActionError::invalid_changeset(
            &display_path,
            "missing frontmatter open fence",
        )
    })?;

    let (frontmatter, summary) = rest.split_once("\n---").ok_or_else(|| {
        ActionError::invalid_changeset(
            &display_path,
            "missing frontmatter close fence",
        )
    })?;

    let mut releases = vec![];

    for line in frontmatter.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (package, bump) = line.split_once(':').ok_or_else(|| {
            ActionError::invalid_changeset(
                &display_path,
                format!("malformed release line: {line}"),
            )
        })?;

        let package = package.trim().trim_matches('"').to_string();

        let bump = bump.trim().parse().map_err(|reason: String| {
            ActionError::invalid_changeset(&display_path, reason)
        })?;

        releases.push(ChangesetRelease { package, bump });
    }

    Ok(Changeset {
        id,
        summary: summary.trim().to_string(),
        releases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_changeset(dir: &Path, name: &str, content: &str) {
        let changeset_dir = dir.join(CHANGESET_DIR);
        std::fs::create_dir_all(&changeset_dir).unwrap();
        std::fs::write(changeset_dir.join(name), content).unwrap();
    }

    #[test_log::test(tokio::test)]
    async fn missing_directory_is_empty_state() {
        let tmp = TempDir::new().unwrap();

        let state = read_changeset_state(tmp.path()).await.unwrap();

        assert!(!state.has_changesets());
        assert!(state.changesets.is_empty());
    }

    #[tokio::test]
    async fn readme_is_not_a_changeset() {
        let tmp = TempDir::new().unwrap();
        write_changeset(tmp.path(), "README.md", "docs, not a changeset");

        let state = read_changeset_state(tmp.path()).await.unwrap();

        assert!(!state.has_changesets());
    }

    #[test_log::test(tokio::test)]
    async fn parses_pending_changesets() {
        let tmp = TempDir::new().unwrap();
        write_changeset(
            tmp.path(),
            "brave-pandas-smile.md",
            "---\n\"pkg-a\": minor\npkg-b: patch\n---\n\nAdd a thing\n",
        );

        let state = read_changeset_state(tmp.path()).await.unwrap();

        assert!(state.has_changesets());
        assert_eq!(state.changesets.len(), 1);

        let changeset = &state.changesets[0];
        assert_eq!(changeset.id, "brave-pandas-smile");
        assert_eq!(changeset.summary, "Add a thing");
        assert_eq!(
            changeset.releases,
            vec![
                ChangesetRelease {
                    package: "pkg-a".to_string(),
                    bump: BumpKind::Minor,
                },
                ChangesetRelease {
                    package: "pkg-b".to_string(),
                    bump: BumpKind::Patch,
                },
            ]
        );
    }

    #[tokio::test]
    async fn changesets_are_sorted_by_filename() {
        let tmp = TempDir::new().unwrap();
        write_changeset(
            tmp.path(),
            "zz-later.md",
            "---\na: patch\n---\nsecond",
        );
        write_changeset(
            tmp.path(),
            "aa-first.md",
            "---\na: patch\n---\nfirst",
        );

        let state = read_changeset_state(tmp.path()).await.unwrap();

        assert_eq!(state.changesets[0].id, "aa-first");
        assert_eq!(state.changesets[1].id, "zz-later");
    }

    #[tokio::test]
    async fn rejects_unknown_bump_kind() {
        let tmp = TempDir::new().unwrap();
        write_changeset(
            tmp.path(),
            "bad.md",
            "---\npkg-a: gigantic\n---\nboom",
        );

        let result = read_changeset_state(tmp.path()).await;
        assert!(result.is_err());

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("bad.md"));
    }

    #[tokio::test]
    async fn rejects_missing_fence() {
        let tmp = TempDir::new().unwrap();
        write_changeset(tmp.path(), "bad.md", "pkg-a: patch\n\nno fences");

        assert!(read_changeset_state(tmp.path()).await.is_err());
    }
}
