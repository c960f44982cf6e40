//! Authentication for the GitHub data repository
//!
//! The publisher never reads ambient secrets itself. It is handed a
//! [`TokenProvider`] and asks it for a token on every remote call.

mod github;

pub use github::{get_github_auth, test_github_auth, GitHubAuthConfig, TOKEN_ENV_VARS};

use crate::error::{Error, Result};
use std::fmt;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// A secret access token
///
/// `Debug` and `Display` never print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw secret, for building request headers only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Capability that yields the repository access token
pub trait TokenProvider: Send + Sync {
    /// Current token
    fn token(&self) -> Result<AccessToken>;
}

/// Provider holding a fixed token
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Create a provider that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

/// Provider reading the token from the environment on every call
///
/// Checks [`TOKEN_ENV_VARS`] in order and returns the first non-empty value.
#[derive(Debug, Clone, Default)]
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn token(&self) -> Result<AccessToken> {
        first_token(TOKEN_ENV_VARS, |name| std::env::var(name).ok())
            .map(|(_, token)| token)
            .ok_or_else(|| {
                Error::Auth(format!(
                    "no access token found; set one of {}",
                    TOKEN_ENV_VARS.join(", ")
                ))
            })
    }
}

/// First non-empty value among `names`, with the variable it came from
pub(crate) fn first_token<'a>(
    names: &[&'a str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<(&'a str, AccessToken)> {
    names.iter().find_map(|name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| (*name, AccessToken::new(v)))
    })
}
