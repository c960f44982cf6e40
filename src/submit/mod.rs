//! Publish engine
//!
//! Handles the workflow of proposing one record to the data repository:
//! 1. Planning - serialize the record and derive its identity
//! 2. Execution - branch, commit and pull request against the remote

mod execute;
mod plan;
mod progress;

pub use execute::{execute_publish, PublishOutcome, PublishState, PublishStep};
pub use plan::{commit_message, content_identity, DATA_DIR, IDENTITY_LEN, PULL_REQUEST_BODY};
pub use progress::{NoopProgress, Phase, ProgressCallback, TracingProgress};

use crate::config::PublishConfig;
use crate::error::Result;
use crate::platform::RepositoryService;
use crate::types::{PublishRequest, SubmissionRecord};
use chrono::NaiveDateTime;

/// Publish a record: plan it, then execute the remote workflow
///
/// Errors only when the record cannot be serialized; remote failures are
/// reported in the returned outcome.
pub async fn publish(
    record: &SubmissionRecord,
    submitted_at: NaiveDateTime,
    config: &PublishConfig,
    service: &dyn RepositoryService,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<PublishOutcome> {
    progress.on_phase(Phase::Planning).await;
    let request = PublishRequest::from_record(record, submitted_at)?;
    tracing::info!(
        identity = %request.content_hash_prefix,
        path = %request.target_path,
        repository = %service.config().slug(),
        "publishing submission"
    );
    Ok(execute_publish(&request, config, service, progress, dry_run).await)
}
