//! Error types for sonidb-submit

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while collecting or publishing a submission
#[derive(Debug, Error)]
pub enum Error {
    /// No usable access token
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    GitHubApi {
        /// HTTP status code
        status: u16,
        /// Response body or client error text
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encode/decode failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed user or configuration input
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid service configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured base branch is absent from the repository's heads
    #[error("base branch '{0}' not found in repository")]
    BaseBranchNotFound(String),

    /// Form value did not match the widget's native type
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Form field name
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A publish run stopped before the pull request was opened
    #[error("publish failed at {step}: {message}")]
    PublishFailed {
        /// Failing step
        step: String,
        /// Error from that step
        message: String,
    },

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

