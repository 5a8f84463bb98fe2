//! Result type for the action.
//!
//! All fallible functions in this crate return the `Result<T>` alias defined
//! here, backed by `color_eyre` so failures carry context chains added via
//! `.wrap_err()` as they propagate up to `main`.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout the action.
pub type Result<T> = EyreResult<T>;
