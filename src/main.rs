//! sonidb-submit - publish sonication records as pull requests
//!
//! Binary running the submission form server, plus helpers for scripted
//! submissions and token checks.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sonidb_submit::config::{
    ServiceConfig, DEFAULT_BASE_BRANCH, DEFAULT_BIND_ADDR, DEFAULT_COMMITTER, DEFAULT_REPOSITORY,
};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "sonidb-submit")]
#[command(about = "Submission form for sonidb - publishes records as GitHub pull requests")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "SONIDB_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ServiceArgs {
    /// Data repository (owner/repo or URL)
    #[arg(long, global = true, env = "SONIDB_REPOSITORY", default_value = DEFAULT_REPOSITORY)]
    repository: String,

    /// User name presented with the token when writing contents
    #[arg(long, global = true, env = "SONIDB_COMMITTER", default_value = DEFAULT_COMMITTER)]
    committer: String,

    /// Branch to fork from and target with pull requests
    #[arg(long, global = true, env = "SONIDB_BASE_BRANCH", default_value = DEFAULT_BASE_BRANCH)]
    base_branch: String,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, global = true, env = "SONIDB_API_URL")]
    api_url: Option<String>,

    /// Address for the form server
    #[arg(long, global = true, env = "SONIDB_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: String,

    /// Timeout for each GitHub request, in seconds
    #[arg(long, global = true, env = "SONIDB_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl ServiceArgs {
    fn to_config(&self) -> sonidb_submit::error::Result<ServiceConfig> {
        ServiceConfig::from_parts(
            &self.repository,
            &self.committer,
            &self.base_branch,
            self.api_url.as_deref(),
            &self.bind,
            self.timeout_secs,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the submission form server (default)
    Serve {
        /// Build requests but send nothing to GitHub
        #[arg(long)]
        dry_run: bool,
    },

    /// Publish one record from a JSON file
    Publish {
        /// JSON file with the nine record fields
        file: PathBuf,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = match cli.command {
        None | Some(Commands::Serve { .. }) => "info",
        Some(_) => "warn",
    };
    cli::init_logging(default_filter, cli.log_json);

    let config = cli.service.to_config()?;

    match cli.command {
        None => cli::run_serve(&config, false).await?,
        Some(Commands::Serve { dry_run }) => cli::run_serve(&config, dry_run).await?,
        Some(Commands::Publish { file, dry_run }) => {
            cli::run_publish(&config, &file, dry_run).await?;
        }
        Some(Commands::Auth { action }) => match action {
            AuthAction::Test => cli::run_auth_test(&config).await?,
            AuthAction::Setup => cli::run_auth_setup(),
        },
    }

    Ok(())
}
