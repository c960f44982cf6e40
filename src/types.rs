//! Core types for sonidb-submit

use crate::document::to_document_json;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One measurement record as entered in the submission form
///
/// Field declaration order is the serialized key order; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Sample identifier, e.g. "TiO2 rutile"
    pub name: String,
    /// Primary particle size in nm (free text, not parsed)
    pub particle_size: String,
    /// Chemical composition label, e.g. "ZnO"
    pub composition: String,
    /// Delivered sonication energy per sample volume, J/mL
    pub energy_density: f64,
    /// DLS Z-average, nm
    pub z_av: f64,
    /// DLS polydispersity index
    pub pdi: f64,
    /// DOI of the literature reference
    pub doi: String,
    /// Submitter name and affiliation (optional)
    pub name_affiliation: String,
    /// Free-text comments (optional)
    pub comments: String,
}

impl SubmissionRecord {
    /// Serialize to the committed document bytes
    ///
    /// UTF-8 JSON in the [`crate::document`] layout, keys in declaration
    /// order. Identical records always produce identical bytes.
    pub fn to_document_bytes(&self) -> Result<Vec<u8>> {
        to_document_json(self)
    }
}

impl fmt::Display for SubmissionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {:?}, particle_size: {:?}, composition: {:?}, energy_density: {:?}, \
             z_av: {:?}, pdi: {:?}, doi: {:?}, name_affiliation: {:?}, comments: {:?}}}",
            self.name,
            self.particle_size,
            self.composition,
            self.energy_density,
            self.z_av,
            self.pdi,
            self.doi,
            self.name_affiliation,
            self.comments,
        )
    }
}

/// Everything needed to publish one record, derived from its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Exact bytes committed to the repository
    pub content_bytes: Vec<u8>,
    /// First 6 hex chars of SHA-224 over `content_bytes`
    pub content_hash_prefix: String,
    /// Repository path, `data/{prefix}.json`
    pub target_path: String,
    /// Branch to create, equal to the hash prefix
    pub branch_name: String,
    /// Commit message, also used as PR title
    pub commit_message: String,
    /// PR description
    pub pull_request_body: String,
}

/// A branch head as returned by the refs listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Full ref name, e.g. "refs/heads/main"
    pub name: String,
    /// Commit SHA the ref points at
    pub sha: String,
}

impl BranchRef {
    /// Short branch name without the `refs/heads/` prefix
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("refs/heads/").unwrap_or(&self.name)
    }
}

/// Result of a create-or-update-file call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCommit {
    /// Path of the written file
    pub path: String,
    /// SHA of the created commit
    pub commit_sha: String,
    /// Web URL of the file on its branch
    pub html_url: Option<String>,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Target repository on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoConfig {
    /// `owner/repo` form used in API paths
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
