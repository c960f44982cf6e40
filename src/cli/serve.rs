//! Serve command - run the submission form server

use sonidb_submit::auth::{EnvTokenProvider, TokenProvider};
use sonidb_submit::config::ServiceConfig;
use sonidb_submit::error::Result;
use sonidb_submit::platform::create_repository_service;
use sonidb_submit::web::{serve, AppState};
use std::sync::Arc;

/// Run the form server until ctrl-c
pub async fn run_serve(config: &ServiceConfig, dry_run: bool) -> Result<()> {
    let tokens = EnvTokenProvider;
    // Missing token is not fatal at startup; each submit re-reads the env.
    if let Err(e) = tokens.token() {
        tracing::warn!(error = %e, "no access token configured yet");
    }

    let service = create_repository_service(config, Arc::new(tokens))?;

    tracing::info!(
        repository = %config.repository.slug(),
        committer = %config.committer,
        base_branch = %config.base_branch,
        api = %config.api_base_url,
        dry_run,
        "starting sonidb submission form"
    );

    let state = AppState {
        service,
        publish: config.publish_config(),
        dry_run,
    };

    serve(config.bind_addr, state).await
}
