//! Phase 1: Publish planning
//!
//! Turns a record into the deterministic request that names the branch,
//! file and commit for it.

use crate::error::Result;
use crate::types::{PublishRequest, SubmissionRecord};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::NaiveDateTime;
use sha2::{Digest, Sha224};

/// Directory in the data repository that holds submissions
pub const DATA_DIR: &str = "data";

/// Hex characters of the content hash used as identity
pub const IDENTITY_LEN: usize = 6;

/// Body of every pull request opened by the publisher
pub const PULL_REQUEST_BODY: &str = "This is an automated PR.";

/// Identity of a document: the first [`IDENTITY_LEN`] lowercase hex chars
/// of SHA-224 over its bytes
pub fn content_identity(content: &[u8]) -> String {
    let digest = Sha224::digest(content);
    let mut hex = hex::encode(digest);
    hex.truncate(IDENTITY_LEN);
    hex
}

/// Commit message embedding the target path and submission time
pub fn commit_message(target_path: &str, submitted_at: NaiveDateTime) -> String {
    format!(
        "Automated upload created for the file {target_path} as of {}",
        submitted_at.format("%Y-%m-%d %H:%M:%S%.6f")
    )
}

impl PublishRequest {
    /// Derive the publish request for `record` submitted at `submitted_at`
    pub fn from_record(record: &SubmissionRecord, submitted_at: NaiveDateTime) -> Result<Self> {
        let content_bytes = record.to_document_bytes()?;
        let content_hash_prefix = content_identity(&content_bytes);
        let target_path = format!("{DATA_DIR}/{content_hash_prefix}.json");
        let commit_message = commit_message(&target_path, submitted_at);

        Ok(Self {
            branch_name: content_hash_prefix.clone(),
            content_bytes,
            content_hash_prefix,
            target_path,
            commit_message,
            pull_request_body: PULL_REQUEST_BODY.to_string(),
        })
    }

    /// Standard base64 of the document bytes, as the contents API expects
    pub fn encoded_content(&self) -> String {
        BASE64.encode(&self.content_bytes)
    }
}
