//! Changelog-entry extraction for release notes and PR bodies.
use std::{fs, path::Path};

/// Extract the changelog section for a specific version from a package's
/// `CHANGELOG.md` content. A section starts at a `## <version>` heading and
/// runs until the next `## ` heading.
pub fn extract_entry(content: &str, version: &str) -> Option<String> {
    let mut lines = content.lines();
    let mut entry: Option<Vec<&str>> = None;

    for line in &mut lines {
        if let Some(heading) = line.strip_prefix("## ") {
            if entry.is_some() {
                break;
            }

            if heading.trim() == version {
                entry = Some(vec![]);
            }
        } else if let Some(entry) = entry.as_mut() {
            entry.push(line);
        }
    }

    entry.map(|lines| lines.join("\n").trim().to_string())
}

/// Read a package's changelog entry for a version, returning an empty string
/// when the changelog or the section is missing.
pub fn read_entry(package_dir: &Path, version: &str) -> String {
    let changelog_path = package_dir.join("CHANGELOG.md");

    fs::read_to_string(changelog_path)
        .ok()
        .and_then(|content| extract_entry(&content, version))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CHANGELOG: &str = "\
# my-package

## 1.1.0

### Minor Changes

- abc1234: Add a thing

## 1.0.0

### Major Changes

- Initial release
";

    #[test]
    fn extracts_entry_for_version() {
        let entry = extract_entry(CHANGELOG, "1.1.0").unwrap();

        assert!(entry.contains("### Minor Changes"));
        assert!(entry.contains("Add a thing"));
        assert!(!entry.contains("Initial release"));
    }

    #[test]
    fn extracts_last_entry() {
        let entry = extract_entry(CHANGELOG, "1.0.0").unwrap();
        assert!(entry.contains("Initial release"));
    }

    #[test]
    fn returns_none_for_missing_version() {
        assert!(extract_entry(CHANGELOG, "2.0.0").is_none());
    }

    #[test]
    fn reads_entry_from_package_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CHANGELOG.md"), CHANGELOG).unwrap();

        let entry = read_entry(tmp.path(), "1.1.0");
        assert!(entry.contains("Add a thing"));
    }

    #[test]
    fn missing_changelog_is_empty_entry() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_entry(tmp.path(), "1.0.0"), "");
    }
}
