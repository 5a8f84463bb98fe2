//! Custom error types for failure classes callers distinguish.

use thiserror::Error;

/// Main error type for action operations.
#[derive(Error, Debug)]
pub enum ActionError {
    // Precondition errors: nothing has been mutated when these fire
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error(
        "Please configure the 'tag' name you wish to use for the release"
    )]
    MissingReleaseTag,

    // External process failures, captured output included for diagnosis
    #[error(
        "Command `{program}` exited with code {code}\nstdout: {stdout}\nstderr: {stderr}"
    )]
    CommandFailed {
        program: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    // Forge/API errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("Invalid changeset {path}: {reason}")]
    InvalidChangeset { path: String, reason: String },

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

impl ActionError {
    /// Create a missing-input precondition error.
    pub fn missing_input(name: impl Into<String>) -> Self {
        Self::MissingInput(name.into())
    }

    /// Create a forge error with context.
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid changeset error naming the offending file.
    pub fn invalid_changeset(
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidChangeset {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ActionError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<octocrab::Error> for ActionError {
    fn from(err: octocrab::Error) -> Self {
        Self::ForgeError(format!("GitHub API error: {}", err))
    }
}
