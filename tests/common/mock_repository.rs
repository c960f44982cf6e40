//! Mock repository service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use sonidb_submit::error::{Error, Result};
use sonidb_submit::platform::RepositoryService;
use sonidb_submit::types::{BranchRef, FileCommit, PullRequest, RepoConfig};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub name: String,
    pub sha: String,
}

/// Call record for `put_file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFileCall {
    pub path: String,
    pub branch: String,
    pub message: String,
    pub content: String,
}

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Injected failure for one step
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: u16,
    pub message: String,
}

impl Failure {
    fn to_error(&self) -> Error {
        Error::GitHubApi {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

/// Simple mock repository service for testing
///
/// Features:
/// - Configurable branch listing
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection per step
pub struct MockRepositoryService {
    config: RepoConfig,
    heads: Mutex<Vec<BranchRef>>,
    next_pr_number: AtomicU64,
    // Call tracking
    list_calls: AtomicU64,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    put_file_calls: Mutex<Vec<PutFileCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_list: Mutex<Option<Failure>>,
    error_on_create_branch: Mutex<Option<Failure>>,
    error_on_put_file: Mutex<Option<Failure>>,
    error_on_create_pr: Mutex<Option<Failure>>,
}

impl MockRepositoryService {
    /// Create a new mock whose listing contains `heads`
    pub fn with_heads(heads: Vec<BranchRef>) -> Self {
        Self {
            config: RepoConfig {
                owner: "testowner".to_string(),
                repo: "testrepo".to_string(),
            },
            heads: Mutex::new(heads),
            next_pr_number: AtomicU64::new(1),
            list_calls: AtomicU64::new(0),
            create_branch_calls: Mutex::new(Vec::new()),
            put_file_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_create_branch: Mutex::new(None),
            error_on_put_file: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `list_branch_refs` fail
    pub fn fail_list(&self, status: u16, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(Failure {
            status,
            message: msg.to_string(),
        });
    }

    /// Make `create_branch` fail
    pub fn fail_create_branch(&self, status: u16, msg: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some(Failure {
            status,
            message: msg.to_string(),
        });
    }

    /// Make `put_file` fail
    pub fn fail_put_file(&self, status: u16, msg: &str) {
        *self.error_on_put_file.lock().unwrap() = Some(Failure {
            status,
            message: msg.to_string(),
        });
    }

    /// Make `create_pull_request` fail
    pub fn fail_create_pr(&self, status: u16, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(Failure {
            status,
            message: msg.to_string(),
        });
    }

    // === Call verification methods ===

    /// Number of `list_branch_refs` calls
    pub fn list_call_count(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Get all `create_branch` calls
    pub fn get_create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// Get all `put_file` calls
    pub fn get_put_file_calls(&self) -> Vec<PutFileCall> {
        self.put_file_calls.lock().unwrap().clone()
    }

    /// Get all `create_pull_request` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Whether any remote call was made at all
    pub fn untouched(&self) -> bool {
        self.list_call_count() == 0
            && self.get_create_branch_calls().is_empty()
            && self.get_put_file_calls().is_empty()
            && self.get_create_pr_calls().is_empty()
    }

    /// Assert that `create_branch` was called with specific args
    pub fn assert_create_branch_called(&self, name: &str, sha: &str) {
        let calls = self.get_create_branch_calls();
        assert!(
            calls.iter().any(|c| c.name == name && c.sha == sha),
            "Expected create_branch({name}, {sha}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl RepositoryService for MockRepositoryService {
    async fn list_branch_refs(&self) -> Result<Vec<BranchRef>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(f) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(f.to_error());
        }

        Ok(self.heads.lock().unwrap().clone())
    }

    async fn create_branch(&self, name: &str, sha: &str) -> Result<BranchRef> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                name: name.to_string(),
                sha: sha.to_string(),
            });

        if let Some(f) = self.error_on_create_branch.lock().unwrap().as_ref() {
            return Err(f.to_error());
        }

        let created = BranchRef {
            name: format!("refs/heads/{name}"),
            sha: sha.to_string(),
        };
        self.heads.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<FileCommit> {
        self.put_file_calls.lock().unwrap().push(PutFileCall {
            path: path.to_string(),
            branch: branch.to_string(),
            message: message.to_string(),
            content: content.to_string(),
        });

        if let Some(f) = self.error_on_put_file.lock().unwrap().as_ref() {
            return Err(f.to_error());
        }

        Ok(FileCommit {
            path: path.to_string(),
            commit_sha: format!("commit-for-{branch}"),
            html_url: None,
        })
    }

    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(f) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(f.to_error());
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/testowner/testrepo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
