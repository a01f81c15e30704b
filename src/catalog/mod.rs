//! Repository catalog: the parsed contents of a repository-list file

use std::collections::BTreeMap;

pub mod parser;

pub use parser::{parse_file, ParseLineError};

/// One named repository with its clone parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub name: String,
    pub url: String,
    pub branch: Option<String>,
}

/// Mapping from repository name to its entry.
///
/// Keyed by name, iterated in name order. Every entry has a non-empty name
/// and URL; `branch` is either absent or non-empty (the parser rejects lines
/// that would violate this).
pub type Catalog = BTreeMap<String, RepoEntry>;
