//! Workflow execution and orchestration.
//!
//! The run is a strictly linear pipeline: credentials, changeset state,
//! versioning, optional prepare script, publishing. Each stage awaits the
//! previous one to completion; there is no retry loop and no branch back to
//! an earlier stage.

/// Publish workflow: invoke the publish tool, parse its output, create tags
/// and releases for each newly published package.
pub mod publish;

/// Orchestrator sequencing the workflows and emitting CI outputs.
pub mod run;

/// Version workflow: apply pending changesets and open or update the
/// "Version Packages" pull request.
pub mod version;
