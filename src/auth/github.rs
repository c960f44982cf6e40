//! GitHub authentication

use crate::auth::{first_token, AccessToken, AuthSource};
use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;

/// Environment variables consulted for the token, highest priority first
pub const TOKEN_ENV_VARS: &[&str] = &["SONIDB_GH_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: AccessToken,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. `SONIDB_GH_TOKEN`, `GH_TOKEN`, `GITHUB_TOKEN` environment variables
/// 2. gh CLI (`gh auth token`)
///
/// The service itself reads env vars through `EnvTokenProvider`; this helper
/// backs the `auth test` command.
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    if let Some((_, token)) = first_token(TOKEN_ENV_VARS, |name| env::var(name).ok()) {
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Some(token) = get_gh_cli_token().await {
        return Ok(GitHubAuthConfig {
            token: AccessToken::new(token),
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub authentication found. Set SONIDB_GH_TOKEN or run `gh auth login`".to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Test GitHub authentication, returning the login the token belongs to
pub async fn test_github_auth(config: &GitHubAuthConfig, api_base_url: &str) -> Result<String> {
    let octocrab = octocrab::Octocrab::builder()
        .personal_token(config.token.expose().to_string())
        .base_uri(api_base_url)
        .map_err(|e| Error::Config(format!("invalid API base URL: {e}")))?
        .build()
        .map_err(|e| Error::Auth(e.to_string()))?;

    let user = octocrab
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;

    Ok(user.login)
}
