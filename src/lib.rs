//! sonidb-submit - publish measurement records as pull requests
//!
//! A small web form collects one sonication record at a time. Each
//! submission is serialized to JSON, named after a hash of its bytes, and
//! proposed to the data repository as branch + commit + pull request.

pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod platform;
pub mod submit;
pub mod types;
pub mod web;
