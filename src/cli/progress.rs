//! CLI progress callback with styled output

use crate::cli::style::{check, cross, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use sonidb_submit::error::Error;
use sonidb_submit::submit::{Phase, ProgressCallback};
use sonidb_submit::types::{BranchRef, FileCommit, PullRequest};

/// CLI progress callback that prints each step as it happens
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Planning => {}
            Phase::Complete => println!("{}", phase.to_string().success()),
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_branch_created(&self, branch: &BranchRef) {
        println!(
            "  {} Created branch {} at {}",
            check(),
            branch.short_name().accent(),
            branch.sha.muted()
        );
    }

    async fn on_file_committed(&self, commit: &FileCommit) {
        println!(
            "  {} Committed {} ({})",
            check(),
            commit.path.accent(),
            commit.commit_sha.muted()
        );
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!("  {} Opened PR {}", check(), pr_num.accent());
        println!("    {}", pr.html_url.accent());
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("  {} {}", cross(), err.to_string().error());
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
