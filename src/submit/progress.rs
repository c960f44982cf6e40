//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (form server, CLI, tests) to
//! receive progress updates while a record is being published.

use crate::error::Error;
use crate::types::{BranchRef, FileCommit, PullRequest};
use async_trait::async_trait;
use std::fmt;

/// Publish phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Building the document and its identity
    Planning,
    /// Looking up the base branch head
    ResolvingBase,
    /// Creating the submission branch
    CreatingBranch,
    /// Writing the document to the branch
    CommittingFile,
    /// Opening the pull request
    OpeningPullRequest,
    /// Publish complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planning => "Planning",
            Self::ResolvingBase => "Resolving base branch",
            Self::CreatingBranch => "Creating branch",
            Self::CommittingFile => "Committing file",
            Self::OpeningPullRequest => "Opening pull request",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during publishing.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when the submission branch exists
    async fn on_branch_created(&self, branch: &BranchRef);

    /// Called when the document is committed
    async fn on_file_committed(&self, commit: &FileCommit);

    /// Called when the pull request is opened
    async fn on_pr_created(&self, pr: &PullRequest);

    /// Called when a step fails
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_branch_created(&self, _branch: &BranchRef) {}
    async fn on_file_committed(&self, _commit: &FileCommit) {}
    async fn on_pr_created(&self, _pr: &PullRequest) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

/// Progress callback that emits `tracing` events
///
/// Used by the form server, where there is no terminal to print to.
pub struct TracingProgress;

#[async_trait]
impl ProgressCallback for TracingProgress {
    async fn on_phase(&self, phase: Phase) {
        tracing::debug!(%phase, "publish phase");
    }

    async fn on_branch_created(&self, branch: &BranchRef) {
        tracing::info!(branch = %branch.name, sha = %branch.sha, "branch created");
    }

    async fn on_file_committed(&self, commit: &FileCommit) {
        tracing::info!(path = %commit.path, commit = %commit.commit_sha, "file committed");
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        tracing::info!(number = pr.number, url = %pr.html_url, "pull request opened");
    }

    async fn on_error(&self, error: &Error) {
        tracing::warn!(%error, "publish step failed");
    }

    async fn on_message(&self, message: &str) {
        tracing::info!("{message}");
    }
}
