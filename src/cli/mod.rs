//! CLI commands
//!
//! Command implementations for the `sonidb-submit` binary.

mod auth;
mod logging;
mod progress;
mod publish;
mod serve;
pub mod style;

pub use auth::{run_auth_setup, run_auth_test};
pub use logging::init_logging;
pub use publish::run_publish;
pub use serve::run_serve;
