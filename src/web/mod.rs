//! Form server
//!
//! One page, one form. `GET /` renders it, `POST /submit` publishes the
//! posted record and shows what happened.

pub mod form;
mod handlers;
pub mod pages;
mod request_tracing;

pub use form::{FieldKind, FieldSpec, SubmissionForm, FIELDS};
pub use request_tracing::{request_id, REQUEST_ID_HEADER};

use crate::config::PublishConfig;
use crate::error::{Error, Result};
use crate::platform::RepositoryService;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Largest accepted form body
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared, immutable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Remote repository
    pub service: Arc<dyn RepositoryService>,
    /// Publish options
    pub publish: PublishConfig,
    /// Build requests but send nothing
    pub dry_run: bool,
}

/// Build the router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form_handler))
        .route("/submit", post(handlers::submit_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(axum::middleware::from_fn(
            request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Bind `addr` and serve until ctrl-c
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("cannot bind {addr}: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| Error::Internal(e.to_string()))?;
    tracing::info!(addr = %local, "form server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
