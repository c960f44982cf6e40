//! Repository slug parsing

use crate::error::{Error, Result};
use crate::types::RepoConfig;
use regex::Regex;
use std::sync::LazyLock;

static RE_SSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@[^:]+:([^/]+)/([^/]+?)(?:\.git)?$").expect("valid ssh regex")
});
static RE_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("valid slug regex"));

/// Parse repository info (owner/repo) from a slug or remote URL
///
/// Accepts `owner/repo`, `https://host/owner/repo(.git)` and
/// `git@host:owner/repo(.git)`.
pub fn parse_repo_slug(input: &str) -> Result<RepoConfig> {
    let input = input.trim();

    if let Some(c) = RE_SSH.captures(input) {
        return Ok(RepoConfig {
            owner: c[1].to_string(),
            repo: c[2].to_string(),
        });
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        let url = url::Url::parse(input)
            .map_err(|e| Error::Parse(format!("cannot parse repository URL {input}: {e}")))?;
        let parts: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        if let [owner, repo] = parts.as_slice() {
            return Ok(RepoConfig {
                owner: (*owner).to_string(),
                repo: repo.trim_end_matches(".git").to_string(),
            });
        }
        return Err(Error::Parse(format!("invalid repo path in URL: {input}")));
    }

    RE_PLAIN
        .captures(input)
        .map(|c| RepoConfig {
            owner: c[1].to_string(),
            repo: c[2].to_string(),
        })
        .ok_or_else(|| Error::Parse(format!("invalid repository slug: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_slug() {
        let config = parse_repo_slug("TineGlaubitz/sonidb").unwrap();
        assert_eq!(config.owner, "TineGlaubitz");
        assert_eq!(config.repo, "sonidb");
    }

    #[test]
    fn test_parse_https() {
        let config = parse_repo_slug("https://github.com/owner/repo.git").unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn test_parse_ssh() {
        let config = parse_repo_slug("git@github.com:owner/repo.git").unwrap();
        assert_eq!(config.slug(), "owner/repo");
    }

    #[test]
    fn test_reject_nested_path() {
        assert!(parse_repo_slug("a/b/c").is_err());
        assert!(parse_repo_slug("https://github.com/a/b/c").is_err());
    }

    #[test]
    fn test_reject_garbage() {
        assert!(parse_repo_slug("").is_err());
        assert!(parse_repo_slug("just-a-name").is_err());
    }
}
