//! Package manifest snapshots and version diffing.
//!
//! A snapshot maps package name to its manifest version and directory,
//! captured before and after the versioning tool runs. The diff of the two
//! snapshots is the set of packages the tool bumped.
use log::*;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::result::Result;

/// Fields we read from a `package.json`.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

/// Version and location of one package at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub version: String,
    pub dir: PathBuf,
}

/// Mapping from package name to manifest state at a point in time.
pub type ManifestSnapshot = BTreeMap<String, PackageInfo>;

/// A package whose version changed between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpedPackage {
    pub name: String,
    pub dir: PathBuf,
    pub old_version: Option<String>,
    pub new_version: String,
}

/// Capture a snapshot of every named package manifest under `cwd`, skipping
/// `node_modules` and hidden directories.
pub fn snapshot(cwd: &Path) -> Result<ManifestSnapshot> {
    let mut packages = ManifestSnapshot::new();
    collect_manifests(cwd, &mut packages)?;

    debug!("captured manifest snapshot of {} packages", packages.len());

    Ok(packages)
}

fn collect_manifests(dir: &Path, packages: &mut ManifestSnapshot) -> Result<()> {
    let manifest_path = dir.join("package.json");

    if manifest_path.is_file() {
        let content = fs::read_to_string(&manifest_path)?;
        let manifest: PackageManifest = serde_json::from_str(&content)?;

        if let (Some(name), Some(version)) = (manifest.name, manifest.version)
        {
            packages.insert(
                name,
                PackageInfo {
                    version,
                    dir: dir.to_path_buf(),
                },
            );
        }
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        let skip = entry
            .file_name()
            .to_str()
            .is_none_or(|name| name == "node_modules" || name.starts_with('.'));

        if !skip {
            collect_manifests(&path, packages)?;
        }
    }

    Ok(())
}

/// Compute the packages whose version changed between two snapshots. New
/// packages count as bumped; removed packages do not.
pub fn diff(
    before: &ManifestSnapshot,
    after: &ManifestSnapshot,
) -> Vec<BumpedPackage> {
    let mut bumped = vec![];

    for (name, info) in after {
        let old_version = before.get(name).map(|p| p.version.clone());

        if old_version.as_deref() != Some(&info.version) {
            bumped.push(BumpedPackage {
                name: name.clone(),
                dir: info.dir.clone(),
                old_version,
                new_version: info.version.clone(),
            });
        }
    }

    bumped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, name: &str, version: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!(r#"{{ "name": "{name}", "version": "{version}" }}"#),
        )
        .unwrap();
    }

    #[test]
    fn snapshots_workspace_packages() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "root", "0.0.0");
        write_manifest(&tmp.path().join("packages/a"), "a", "1.0.0");
        write_manifest(&tmp.path().join("packages/b"), "b", "2.1.0");

        let snap = snapshot(tmp.path()).unwrap();

        assert_eq!(snap.len(), 3);
        assert_eq!(snap["a"].version, "1.0.0");
        assert_eq!(snap["b"].version, "2.1.0");
        assert_eq!(snap["a"].dir, tmp.path().join("packages/a"));
    }

    #[test]
    fn skips_node_modules_and_hidden_dirs() {
        let tmp = TempDir::new().unwrap();
        write_manifest(&tmp.path().join("packages/a"), "a", "1.0.0");
        write_manifest(
            &tmp.path().join("node_modules/dep"),
            "dep",
            "9.9.9",
        );
        write_manifest(&tmp.path().join(".cache/pkg"), "cached", "0.1.0");

        let snap = snapshot(tmp.path()).unwrap();

        assert_eq!(snap.len(), 1);
        assert!(snap.contains_key("a"));
    }

    #[test]
    fn ignores_manifests_without_name_or_version() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("package.json"),
            r#"{ "private": true, "workspaces": ["packages/*"] }"#,
        )
        .unwrap();

        let snap = snapshot(tmp.path()).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn diff_reports_only_changed_versions() {
        let tmp = TempDir::new().unwrap();
        write_manifest(&tmp.path().join("packages/a"), "a", "1.0.0");
        write_manifest(&tmp.path().join("packages/b"), "b", "2.0.0");

        let before = snapshot(tmp.path()).unwrap();

        write_manifest(&tmp.path().join("packages/a"), "a", "1.1.0");

        let after = snapshot(tmp.path()).unwrap();
        let bumped = diff(&before, &after);

        assert_eq!(bumped.len(), 1);
        assert_eq!(bumped[0].name, "a");
        assert_eq!(bumped[0].old_version.as_deref(), Some("1.0.0"));
        assert_eq!(bumped[0].new_version, "1.1.0");
    }

    #[test]
    fn diff_counts_new_packages_as_bumped() {
        let before = ManifestSnapshot::new();

        let mut after = ManifestSnapshot::new();
        after.insert(
            "fresh".to_string(),
            PackageInfo {
                version: "0.1.0".to_string(),
                dir: PathBuf::from("packages/fresh"),
            },
        );

        let bumped = diff(&before, &after);
        assert_eq!(bumped.len(), 1);
        assert_eq!(bumped[0].old_version, None);
    }
}
