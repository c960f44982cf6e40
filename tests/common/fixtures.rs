//! Test data factories for sonidb-submit types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sonidb_submit::types::{BranchRef, SubmissionRecord};

/// Identity of [`tio2_record`]'s document
pub const TIO2_IDENTITY: &str = "cfc5d1";

/// Document bytes of [`tio2_record`]
pub const TIO2_DOCUMENT: &str = r#"{"name": "TiO2", "particle_size": "50", "composition": "TiO2", "energy_density": 1.2, "z_av": 80.0, "pdi": 0.2, "doi": "10.1/x", "name_affiliation": "A. Researcher, Inst.", "comments": ""}"#;

/// Base64 of [`TIO2_DOCUMENT`]
pub const TIO2_BASE64: &str = "eyJuYW1lIjogIlRpTzIiLCAicGFydGljbGVfc2l6ZSI6ICI1MCIsICJjb21wb3NpdGlvbiI6ICJUaU8yIiwgImVuZXJneV9kZW5zaXR5IjogMS4yLCAiel9hdiI6IDgwLjAsICJwZGkiOiAwLjIsICJkb2kiOiAiMTAuMS94IiwgIm5hbWVfYWZmaWxpYXRpb24iOiAiQS4gUmVzZWFyY2hlciwgSW5zdC4iLCAiY29tbWVudHMiOiAiIn0=";

/// The reference TiO2 record
pub fn tio2_record() -> SubmissionRecord {
    SubmissionRecord {
        name: "TiO2".to_string(),
        particle_size: "50".to_string(),
        composition: "TiO2".to_string(),
        energy_density: 1.2,
        z_av: 80.0,
        pdi: 0.2,
        doi: "10.1/x".to_string(),
        name_affiliation: "A. Researcher, Inst.".to_string(),
        comments: String::new(),
    }
}

/// Form body posting [`tio2_record`]
pub fn tio2_form_body() -> &'static str {
    "name=TiO2&particle_size=50&composition=TiO2&energy_density=1.2&z_av=80.0&pdi=0.2\
&doi=10.1%2Fx&name_affiliation=A.+Researcher%2C+Inst.&comments="
}

/// Fixed submission time
pub fn submitted_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_micro_opt(12, 30, 5, 123_456)
        .unwrap()
}

/// A branch head
pub fn head(name: &str, sha: &str) -> BranchRef {
    BranchRef {
        name: format!("refs/heads/{name}"),
        sha: sha.to_string(),
    }
}

/// Listing with only `main` at `abc123`
pub fn main_only() -> Vec<BranchRef> {
    vec![head("main", "abc123")]
}
