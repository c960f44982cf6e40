//! Remote repository services
//!
//! Provides the narrow set of GitHub operations the publisher needs:
//! list branch heads, create a branch, write a file, open a pull request.

mod detection;
mod factory;
mod github;

pub use detection::parse_repo_slug;
pub use factory::create_repository_service;
pub use github::{GitHubService, DEFAULT_API_BASE_URL};

use crate::error::Result;
use crate::types::{BranchRef, FileCommit, PullRequest, RepoConfig};
use async_trait::async_trait;

/// Repository service trait for the publish workflow
///
/// The submission engine only talks to this trait, so tests can swap in a
/// recording mock instead of the HTTP client.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// List branch heads in the order the provider returns them
    async fn list_branch_refs(&self) -> Result<Vec<BranchRef>>;

    /// Create `refs/heads/{name}` pointing at `sha`
    async fn create_branch(&self, name: &str, sha: &str) -> Result<BranchRef>;

    /// Create or update a file on `branch`; `content` is base64
    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<FileCommit>;

    /// Open a pull request from `head` into `base`
    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// Get the repository configuration
    fn config(&self) -> &RepoConfig;
}
