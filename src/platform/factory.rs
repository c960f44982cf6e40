//! Repository service factory
//!
//! Creates the repository service from service configuration.

use crate::auth::TokenProvider;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::platform::{GitHubService, RepositoryService};
use std::sync::Arc;

/// Create a repository service from configuration
///
/// The token provider is injected; the service asks it for a token on every
/// call and never caches the secret.
pub fn create_repository_service(
    config: &ServiceConfig,
    tokens: Arc<dyn TokenProvider>,
) -> Result<Arc<dyn RepositoryService>> {
    let service = GitHubService::new(
        config.repository.clone(),
        config.committer.clone(),
        &config.api_base_url,
        tokens,
        Some(config.request_timeout),
    )?;
    Ok(Arc::new(service))
}
