//! Service configuration
//!
//! The binary builds [`ServiceConfig`] from flags and environment variables;
//! library users construct it directly.

use crate::error::{Error, Result};
use crate::platform::{parse_repo_slug, DEFAULT_API_BASE_URL};
use crate::types::RepoConfig;
use std::net::SocketAddr;
use std::time::Duration;

/// Default data repository
pub const DEFAULT_REPOSITORY: &str = "TineGlaubitz/sonidb";
/// Default committer user name
pub const DEFAULT_COMMITTER: &str = "TineGlaubitz";
/// Default base branch for new branches and pull requests
pub const DEFAULT_BASE_BRANCH: &str = "main";
/// Default form server address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Full service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Target repository
    pub repository: RepoConfig,
    /// User name presented with the token on content writes
    pub committer: String,
    /// Branch used as fork point and pull request target
    pub base_branch: String,
    /// GitHub REST API base URL
    pub api_base_url: String,
    /// Address the form server listens on
    pub bind_addr: SocketAddr,
    /// Per-request timeout for GitHub calls
    pub request_timeout: Duration,
}

impl ServiceConfig {
    /// Build a configuration from raw option values, validating each
    pub fn from_parts(
        repository: &str,
        committer: &str,
        base_branch: &str,
        api_base_url: Option<&str>,
        bind_addr: &str,
        request_timeout_secs: u64,
    ) -> Result<Self> {
        let repository = parse_repo_slug(repository)?;

        let committer = committer.trim();
        if committer.is_empty() {
            return Err(Error::Config("committer must not be empty".to_string()));
        }

        let base_branch = base_branch.trim();
        if base_branch.is_empty() {
            return Err(Error::Config("base branch must not be empty".to_string()));
        }

        let bind_addr = bind_addr
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address '{bind_addr}': {e}")))?;

        if request_timeout_secs == 0 {
            return Err(Error::Config("request timeout must be positive".to_string()));
        }

        Ok(Self {
            repository,
            committer: committer.to_string(),
            base_branch: base_branch.to_string(),
            api_base_url: api_base_url.unwrap_or(DEFAULT_API_BASE_URL).to_string(),
            bind_addr,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// The slice of configuration the publish workflow needs
    pub fn publish_config(&self) -> PublishConfig {
        PublishConfig {
            base_branch: self.base_branch.clone(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            repository: RepoConfig {
                owner: "TineGlaubitz".to_string(),
                repo: "sonidb".to_string(),
            },
            committer: DEFAULT_COMMITTER.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Options for one publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Branch used as fork point and pull request target
    pub base_branch: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
        }
    }
}
