//! Publish command - submit one record from a JSON file

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use sonidb_submit::auth::EnvTokenProvider;
use sonidb_submit::config::ServiceConfig;
use sonidb_submit::error::{Error, Result};
use sonidb_submit::platform::create_repository_service;
use sonidb_submit::submit::publish;
use sonidb_submit::types::SubmissionRecord;
use std::path::Path;
use std::sync::Arc;

/// Run the publish command
///
/// The file must hold one JSON object with the nine record fields.
pub async fn run_publish(config: &ServiceConfig, file: &Path, dry_run: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| Error::Parse(format!("cannot read {}: {e}", file.display())))?;
    let record: SubmissionRecord = serde_json::from_str(&raw)?;

    let service = create_repository_service(config, Arc::new(EnvTokenProvider))?;

    println!(
        "Publishing {} to {}",
        record.name.emphasis(),
        service.config().slug().accent()
    );

    let submitted_at = chrono::Local::now().naive_local();
    let outcome = publish(
        &record,
        submitted_at,
        &config.publish_config(),
        service.as_ref(),
        &CliProgress,
        dry_run,
    )
    .await?;

    println!();
    if let Some(step) = outcome.failed_step() {
        eprintln!("{}", format!("Publishing failed at step: {step}").error());
        return Err(Error::PublishFailed {
            step: step.to_string(),
            message: outcome.error.unwrap_or_default(),
        });
    }

    if dry_run {
        println!("Would write {}", outcome.target_path.accent());
    } else {
        println!(
            "Submitted {} on branch {}",
            outcome.target_path.accent(),
            outcome.branch_name.accent()
        );
    }
    Ok(())
}
