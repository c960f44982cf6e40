//! GitHub repository service implementation

use crate::auth::TokenProvider;
use crate::error::{Error, Result};
use crate::platform::RepositoryService;
use crate::types::{BranchRef, FileCommit, PullRequest, RepoConfig};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// Public GitHub REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size requested from the refs listing (GitHub's maximum)
const REFS_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!("sonidb-submit/", env!("CARGO_PKG_VERSION"));

static RE_NEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).expect("valid link regex")
});

/// GitHub service using reqwest
pub struct GitHubService {
    client: Client,
    api_base_url: String,
    committer: String,
    tokens: Arc<dyn TokenProvider>,
    config: RepoConfig,
}

#[derive(Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_name: String,
    object: GitObject,
}

#[derive(Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: &'a str,
}

#[derive(Serialize)]
struct PutContentsPayload<'a> {
    branch: &'a str,
    message: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct PutContentsResponse {
    content: Option<ContentInfo>,
    commit: CommitInfo,
}

#[derive(Deserialize)]
struct ContentInfo {
    path: String,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct CommitInfo {
    sha: String,
}

#[derive(Serialize)]
struct CreatePullPayload<'a> {
    head: &'a str,
    base: &'a str,
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
    title: String,
    head: PullBranch,
    base: PullBranch,
}

#[derive(Deserialize)]
struct PullBranch {
    #[serde(rename = "ref")]
    ref_field: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_base_url` is normally [`DEFAULT_API_BASE_URL`]; GitHub Enterprise
    /// and tests point it elsewhere. `committer` is the user name presented
    /// with the token when writing file contents.
    pub fn new(
        config: RepoConfig,
        committer: String,
        api_base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()?;

        url::Url::parse(api_base_url)
            .map_err(|e| Error::Config(format!("invalid API base URL '{api_base_url}': {e}")))?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            committer,
            tokens,
            config,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base_url, self.config.owner, self.config.repo, path
        )
    }

    fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        self.api_url(&format!("/contents/{}", encoded.join("/")))
    }

    fn with_headers(request: RequestBuilder) -> RequestBuilder {
        request
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Target of the `rel="next"` entry in a `Link` header
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    RE_NEXT_LINK.captures(link).map(|c| c[1].to_string())
}

/// Turn a non-success response into `Error::GitHubApi` carrying the body
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    Err(Error::GitHubApi {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RepositoryService for GitHubService {
    async fn list_branch_refs(&self) -> Result<Vec<BranchRef>> {
        let mut url = format!(
            "{}?per_page={REFS_PER_PAGE}",
            self.api_url("/git/refs/heads")
        );
        let mut heads = Vec::new();

        // Every submission leaves a branch behind, so the listing spans pages.
        loop {
            let token = self.tokens.token()?;
            let request = self.client.get(&url).header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", token.expose()),
            );

            let response = ensure_success(Self::with_headers(request).send().await?).await?;
            let next = next_page_url(response.headers());
            let refs: Vec<GitRef> = response.json().await?;

            heads.extend(refs.into_iter().map(|r| BranchRef {
                name: r.ref_name,
                sha: r.object.sha,
            }));

            match next {
                None => break,
                Some(next) if next.starts_with(&format!("{}/", self.api_base_url)) => {
                    tracing::debug!(url = %next, "following branch listing page");
                    url = next;
                }
                Some(next) => {
                    return Err(Error::Parse(format!(
                        "pagination link outside the API base URL: {next}"
                    )));
                }
            }
        }

        Ok(heads)
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<BranchRef> {
        let token = self.tokens.token()?;
        let url = self.api_url("/git/refs");

        let payload = CreateRefPayload {
            ref_name: format!("refs/heads/{name}"),
            sha,
        };

        let request = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", token.expose()),
            )
            .json(&payload);

        let response = Self::with_headers(request).send().await?;
        let created: GitRef = ensure_success(response).await?.json().await?;

        Ok(BranchRef {
            name: created.ref_name,
            sha: created.object.sha,
        })
    }

    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<FileCommit> {
        let token = self.tokens.token()?;
        let url = self.contents_url(path);

        let payload = PutContentsPayload {
            branch,
            message,
            content,
        };

        let request = self
            .client
            .put(&url)
            .basic_auth(&self.committer, Some(token.expose()))
            .json(&payload);

        let response = Self::with_headers(request).send().await?;
        let written: PutContentsResponse = ensure_success(response).await?.json().await?;

        let (path, html_url) = written
            .content
            .map_or_else(|| (path.to_string(), None), |c| (c.path, c.html_url));

        Ok(FileCommit {
            path,
            commit_sha: written.commit.sha,
            html_url,
        })
    }

    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let token = self.tokens.token()?;
        let url = self.api_url("/pulls");

        let payload = CreatePullPayload {
            head,
            base,
            title,
            body,
        };

        let request = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .json(&payload);

        let response = Self::with_headers(request).send().await?;
        let pr: PullResponse = ensure_success(response).await?.json().await?;

        Ok(PullRequest {
            number: pr.number,
            html_url: pr.html_url,
            base_ref: pr.base.ref_field,
            head_ref: pr.head.ref_field,
            title: pr.title,
        })
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    fn service(base: &str) -> GitHubService {
        GitHubService::new(
            RepoConfig {
                owner: "owner".to_string(),
                repo: "repo".to_string(),
            },
            "committer".to_string(),
            base,
            Arc::new(StaticTokenProvider::new("t")),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let svc = service("https://api.github.com/");
        assert_eq!(
            svc.api_url("/git/refs/heads"),
            "https://api.github.com/repos/owner/repo/git/refs/heads"
        );
    }

    #[test]
    fn test_contents_url_keeps_path_separators() {
        let svc = service("https://api.github.com");
        assert_eq!(
            svc.contents_url("data/a1b2c3.json"),
            "https://api.github.com/repos/owner/repo/contents/data/a1b2c3.json"
        );
    }

    #[test]
    fn test_next_page_url() {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::LINK,
            reqwest::header::HeaderValue::from_static(
                r#"<https://api.github.com/repos/o/r/git/refs/heads?page=1>; rel="prev", <https://api.github.com/repos/o/r/git/refs/heads?page=3>; rel="next", <https://api.github.com/repos/o/r/git/refs/heads?page=9>; rel="last""#,
            ),
        );
        assert_eq!(
            next_page_url(&headers).as_deref(),
            Some("https://api.github.com/repos/o/r/git/refs/heads?page=3")
        );
    }

    #[test]
    fn test_no_next_page_on_last_page() {
        let mut headers = HeaderMap::new();
        assert!(next_page_url(&headers).is_none());
        headers.insert(
            reqwest::header::LINK,
            reqwest::header::HeaderValue::from_static(
                r#"<https://api.github.com/repos/o/r/git/refs/heads?page=1>; rel="first""#,
            ),
        );
        assert!(next_page_url(&headers).is_none());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = GitHubService::new(
            RepoConfig {
                owner: "o".to_string(),
                repo: "r".to_string(),
            },
            "c".to_string(),
            "not a url",
            Arc::new(StaticTokenProvider::new("t")),
            None,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
