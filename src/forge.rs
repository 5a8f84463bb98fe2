//! Interface to the Git forge hosting the repository.
//!
//! Provides token-based authentication, release PR operations, and tag and
//! release creation through a common trait.

/// Configuration and authentication for the forge connection.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Common trait for forge operations.
pub mod traits;

/// Shared data types for pull requests and releases.
pub mod types;
