//! Machine-readable outputs for the hosting CI workflow.
//!
//! Values are appended to the file named by `$GITHUB_OUTPUT`; when it is
//! unset (older runners, local runs) the legacy `::set-output` workflow
//! command is printed instead. Errors surface as `::error::` annotations.
use log::*;
use std::{env, fs::OpenOptions, io::Write};

use crate::{result::Result, tool::PublishResult};

/// Output values every terminal state must set exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutputs {
    /// "true" when at least one package was published.
    pub published: String,
    /// JSON array of { name, version } objects.
    pub published_packages: String,
    /// "true" when pending changesets were found.
    pub has_changesets: String,
}

impl RunOutputs {
    /// Outputs for the no-publish paths.
    pub fn unpublished(has_changesets: bool) -> Self {
        Self {
            published: "false".to_string(),
            published_packages: "[]".to_string(),
            has_changesets: has_changesets.to_string(),
        }
    }

    /// Outputs derived from a publish result.
    pub fn from_publish_result(result: &PublishResult) -> Result<Self> {
        Ok(Self {
            published: result.published.to_string(),
            published_packages: serde_json::to_string(
                &result.published_packages,
            )?,
            has_changesets: "true".to_string(),
        })
    }

    /// Write all three outputs for the calling workflow.
    pub fn emit(&self) -> Result<()> {
        set_output("published", &self.published)?;
        set_output("publishedPackages", &self.published_packages)?;
        set_output("hasChangesets", &self.has_changesets)?;

        Ok(())
    }
}

fn set_output(name: &str, value: &str) -> Result<()> {
    debug!("setting output {name}={value}");

    if let Ok(path) = env::var("GITHUB_OUTPUT") {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{name}={value}")?;
    } else {
        println!("::set-output name={name}::{value}");
    }

    Ok(())
}

/// Report a failure to the hosting workflow with a human-readable message.
pub fn annotate_error(message: &str) {
    // single-line form so the runner parses the full message
    println!("::error::{}", message.replace('\n', "%0A"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::PublishedPackage;

    #[test]
    fn unpublished_outputs_for_no_changesets() {
        let outputs = RunOutputs::unpublished(false);

        assert_eq!(outputs.published, "false");
        assert_eq!(outputs.published_packages, "[]");
        assert_eq!(outputs.has_changesets, "false");
    }

    #[test]
    fn unpublished_outputs_for_pending_changesets() {
        let outputs = RunOutputs::unpublished(true);

        assert_eq!(outputs.published, "false");
        assert_eq!(outputs.has_changesets, "true");
    }

    #[test]
    fn outputs_from_publish_result() {
        let result = PublishResult {
            published: true,
            published_packages: vec![PublishedPackage {
                name: "a".to_string(),
                version: "1.1.0".to_string(),
            }],
        };

        let outputs = RunOutputs::from_publish_result(&result).unwrap();

        assert_eq!(outputs.published, "true");
        assert_eq!(
            outputs.published_packages,
            r#"[{"name":"a","version":"1.1.0"}]"#
        );
        assert_eq!(outputs.has_changesets, "true");
    }

    #[test]
    fn outputs_from_empty_publish_result() {
        let outputs =
            RunOutputs::from_publish_result(&PublishResult::default())
                .unwrap();

        assert_eq!(outputs.published, "false");
        assert_eq!(outputs.published_packages, "[]");
    }
}
