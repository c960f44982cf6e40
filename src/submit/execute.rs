//! Phase 2: Publish execution
//!
//! Runs the remote steps in order: resolve base, create branch, commit
//! file, open pull request. Each step only runs if the previous one
//! succeeded; nothing is rolled back on failure.

use crate::config::PublishConfig;
use crate::error::{Error, Result};
use crate::platform::RepositoryService;
use crate::submit::{Phase, ProgressCallback};
use crate::types::{FileCommit, PublishRequest, PullRequest};
use std::fmt;

/// A remote step of the publish workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    /// List branch heads and pick the base sha
    ResolveBase,
    /// Create the submission branch
    CreateBranch,
    /// Write the document on the branch
    CommitFile,
    /// Open the pull request
    OpenPullRequest,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ResolveBase => "resolve base branch",
            Self::CreateBranch => "create branch",
            Self::CommitFile => "commit file",
            Self::OpenPullRequest => "open pull request",
        };
        f.write_str(s)
    }
}

/// Where a publish run stands
///
/// Moves forward one state per successful step. A failed step moves to
/// `FailedAt` and no further step is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    /// Nothing sent yet
    NotStarted,
    /// Base sha known
    BranchResolved,
    /// Submission branch exists
    BranchCreated,
    /// Document committed on the branch
    Committed,
    /// Pull request open; terminal success
    PullRequestOpened,
    /// A step failed; terminal
    FailedAt(PublishStep),
}

impl PublishState {
    /// The step that moves out of this state, if any
    pub const fn next_step(self) -> Option<PublishStep> {
        match self {
            Self::NotStarted => Some(PublishStep::ResolveBase),
            Self::BranchResolved => Some(PublishStep::CreateBranch),
            Self::BranchCreated => Some(PublishStep::CommitFile),
            Self::Committed => Some(PublishStep::OpenPullRequest),
            Self::PullRequestOpened | Self::FailedAt(_) => None,
        }
    }

    /// State after the next step succeeds
    pub const fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::BranchResolved,
            Self::BranchResolved => Self::BranchCreated,
            Self::BranchCreated => Self::Committed,
            Self::Committed | Self::PullRequestOpened => Self::PullRequestOpened,
            Self::FailedAt(step) => Self::FailedAt(step),
        }
    }

    /// State after the next step fails
    pub const fn fail(self) -> Self {
        match self.next_step() {
            Some(step) => Self::FailedAt(step),
            None => self,
        }
    }
}

/// Result of publish execution
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Final state
    pub state: PublishState,
    /// Branch the run targeted
    pub branch_name: String,
    /// File path the run targeted
    pub target_path: String,
    /// Base sha, once resolved
    pub base_sha: Option<String>,
    /// Commit of the document, once written
    pub commit: Option<FileCommit>,
    /// Pull request, once opened
    pub pull_request: Option<PullRequest>,
    /// Error message from the failing step
    pub error: Option<String>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl PublishOutcome {
    fn new(request: &PublishRequest, dry_run: bool) -> Self {
        Self {
            state: PublishState::NotStarted,
            branch_name: request.branch_name.clone(),
            target_path: request.target_path.clone(),
            base_sha: None,
            commit: None,
            pull_request: None,
            error: None,
            dry_run,
        }
    }

    /// Whether the pull request was opened
    pub const fn succeeded(&self) -> bool {
        matches!(self.state, PublishState::PullRequestOpened)
    }

    /// The step that failed, if any
    pub const fn failed_step(&self) -> Option<PublishStep> {
        match self.state {
            PublishState::FailedAt(step) => Some(step),
            _ => None,
        }
    }
}

/// Execute the publish workflow for a prepared request
///
/// Never returns early with `Err`: a failing step is recorded in the
/// outcome and stops the run.
pub async fn execute_publish(
    request: &PublishRequest,
    config: &PublishConfig,
    service: &dyn RepositoryService,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> PublishOutcome {
    let mut outcome = PublishOutcome::new(request, dry_run);

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
        report_dry_run(request, config, service, progress).await;
        return outcome;
    }

    // Phase: resolving base
    progress.on_phase(Phase::ResolvingBase).await;
    let base_sha = match resolve_base_sha(service, &config.base_branch).await {
        Ok(sha) => sha,
        Err(e) => return fail(outcome, e, progress).await,
    };
    outcome.base_sha = Some(base_sha.clone());
    outcome.state = outcome.state.advance();

    // Phase: creating branch
    progress.on_phase(Phase::CreatingBranch).await;
    match service.create_branch(&request.branch_name, &base_sha).await {
        Ok(branch) => {
            progress.on_branch_created(&branch).await;
            outcome.state = outcome.state.advance();
        }
        Err(e) => {
            let e = explain_branch_conflict(e, &request.branch_name);
            return fail(outcome, e, progress).await;
        }
    }

    // Phase: committing file
    progress.on_phase(Phase::CommittingFile).await;
    match service
        .put_file(
            &request.target_path,
            &request.branch_name,
            &request.commit_message,
            &request.encoded_content(),
        )
        .await
    {
        Ok(commit) => {
            progress.on_file_committed(&commit).await;
            outcome.commit = Some(commit);
            outcome.state = outcome.state.advance();
        }
        Err(e) => return fail(outcome, e, progress).await,
    }

    // Phase: opening pull request
    progress.on_phase(Phase::OpeningPullRequest).await;
    match service
        .create_pull_request(
            &request.branch_name,
            &config.base_branch,
            &request.commit_message,
            &request.pull_request_body,
        )
        .await
    {
        Ok(pr) => {
            progress.on_pr_created(&pr).await;
            outcome.pull_request = Some(pr);
            outcome.state = outcome.state.advance();
        }
        Err(e) => return fail(outcome, e, progress).await,
    }

    progress.on_phase(Phase::Complete).await;

    outcome
}

/// Sha of `refs/heads/{base_branch}` from the branch listing
async fn resolve_base_sha(service: &dyn RepositoryService, base_branch: &str) -> Result<String> {
    let heads = service.list_branch_refs().await?;
    heads
        .into_iter()
        .find(|head| head.short_name() == base_branch)
        .map(|head| head.sha)
        .ok_or_else(|| Error::BaseBranchNotFound(base_branch.to_string()))
}

/// GitHub answers 422 "Reference already exists" when identical content
/// was submitted before; say so instead of echoing the raw body.
fn explain_branch_conflict(err: Error, branch: &str) -> Error {
    match err {
        Error::GitHubApi { status: 422, message } if message.contains("already exists") => {
            Error::GitHubApi {
                status: 422,
                message: format!(
                    "branch '{branch}' already exists; an identical record was submitted before"
                ),
            }
        }
        other => other,
    }
}

async fn fail(
    mut outcome: PublishOutcome,
    err: Error,
    progress: &dyn ProgressCallback,
) -> PublishOutcome {
    let step = outcome.state.next_step();
    match &err {
        Error::GitHubApi { status, message } => {
            tracing::error!(
                step = ?step,
                status = *status,
                body = %message,
                branch = %outcome.branch_name,
                "GitHub rejected publish step"
            );
        }
        Error::Http(e) => {
            tracing::error!(
                step = ?step,
                error = %e,
                branch = %outcome.branch_name,
                "transport error during publish step"
            );
        }
        other => {
            tracing::error!(step = ?step, error = %other, "publish step failed");
        }
    }

    progress.on_error(&err).await;
    outcome.error = Some(err.to_string());
    outcome.state = outcome.state.fail();
    outcome
}

/// Report what would be done in a dry run
async fn report_dry_run(
    request: &PublishRequest,
    config: &PublishConfig,
    service: &dyn RepositoryService,
    progress: &dyn ProgressCallback,
) {
    let slug = service.config().slug();
    progress
        .on_message(&format!(
            "Would branch {} from {} in {slug}",
            request.branch_name, config.base_branch
        ))
        .await;
    progress
        .on_message(&format!(
            "Would commit {} ({} bytes)",
            request.target_path,
            request.content_bytes.len()
        ))
        .await;
    progress
        .on_message(&format!(
            "Would open PR {} -> {}: {}",
            request.branch_name, config.base_branch, request.commit_message
        ))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_advances_in_order() {
        let mut state = PublishState::NotStarted;
        let mut steps = Vec::new();
        while let Some(step) = state.next_step() {
            steps.push(step);
            state = state.advance();
        }
        assert_eq!(
            steps,
            vec![
                PublishStep::ResolveBase,
                PublishStep::CreateBranch,
                PublishStep::CommitFile,
                PublishStep::OpenPullRequest,
            ]
        );
        assert_eq!(state, PublishState::PullRequestOpened);
        assert!(state.next_step().is_none());
    }

    #[test]
    fn test_fail_records_pending_step() {
        assert_eq!(
            PublishState::BranchCreated.fail(),
            PublishState::FailedAt(PublishStep::CommitFile)
        );
        assert_eq!(
            PublishState::NotStarted.fail(),
            PublishState::FailedAt(PublishStep::ResolveBase)
        );
    }

    #[test]
    fn test_failed_state_is_sticky() {
        let failed = PublishState::FailedAt(PublishStep::CreateBranch);
        assert_eq!(failed.advance(), failed);
        assert_eq!(failed.fail(), failed);
        assert!(failed.next_step().is_none());
    }

    #[test]
    fn test_explain_branch_conflict() {
        let err = Error::GitHubApi {
            status: 422,
            message: r#"{"message":"Reference already exists"}"#.to_string(),
        };
        let explained = explain_branch_conflict(err, "ba4e03");
        assert!(explained.to_string().contains("identical record"));

        let other = Error::GitHubApi {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(
            explain_branch_conflict(other, "x").to_string(),
            "GitHub API error (404): Not Found"
        );
    }
}
