//! Auth command - test and explain token setup

use crate::cli::style::{check, Stylize};
use anstream::println;
use sonidb_submit::auth::{get_github_auth, test_github_auth, TOKEN_ENV_VARS};
use sonidb_submit::config::ServiceConfig;
use sonidb_submit::error::Result;

/// Run the auth test command
pub async fn run_auth_test(config: &ServiceConfig) -> Result<()> {
    println!("Testing GitHub authentication...");
    let auth = get_github_auth().await?;
    let username = test_github_auth(&auth, &config.api_base_url).await?;
    println!("{} Authenticated as: {}", check(), username.accent());
    println!("Token source: {}", format!("{:?}", auth.source).muted());
    if username != config.committer {
        println!(
            "{}",
            format!(
                "Note: committer is '{}'; content writes authenticate as that user",
                config.committer
            )
            .muted()
        );
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("The token needs permission to create branches, write contents");
    println!("and open pull requests on the data repository.");
    println!();
    println!("Option 1: Environment variable (used by the form server)");
    println!("  Set one of: {}", TOKEN_ENV_VARS.join(", ").accent());
    println!();
    println!("Option 2: GitHub CLI (auth test only)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: {}", "gh auth login".accent());
    println!();
    println!("For GitHub Enterprise:");
    println!("  Pass --api-url https://<host>/api/v3");
}
