//! Line-oriented parser for repository-list files
//!
//! The format is a flat list of entry declarations with optional branch
//! annotations:
//!
//! ```text
//! - <name>: <url>
//!   - branch: <branch-name>
//! - <name2>: <url2>
//! ```
//!
//! Only the first colon separates name from URL, so URLs containing colons
//! survive intact. Malformed lines are collected as [`ParseLineError`]s and
//! skipped; they never abort the parse.

use crate::catalog::{Catalog, RepoEntry};
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// Prefix that marks a branch annotation for the entry declared above it.
const BRANCH_PREFIX: &str = "- branch:";

/// A recoverable per-line parse failure. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseLineError {
    #[error("line {line}: entry declaration has no colon: {text:?}")]
    MissingColon { line: usize, text: String },

    #[error("line {line}: entry declaration has an empty name: {text:?}")]
    EmptyName { line: usize, text: String },

    #[error("line {line}: entry {name:?} has an empty URL")]
    EmptyUrl { line: usize, name: String },

    #[error("line {line}: branch annotation has an empty value")]
    EmptyBranch { line: usize },

    #[error("line {line}: branch annotation precedes any entry declaration")]
    DanglingBranch { line: usize },
}

/// Read and parse a repository-list file.
///
/// The caller is expected to have checked that the file exists; any read
/// failure here is surfaced as a hard error.
pub fn parse_file(path: &Path) -> Result<(Catalog, Vec<ParseLineError>)> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed reading repository list: {}", path.display()))?;
    Ok(parse_str(&contents))
}

/// Parse repository-list text into a catalog plus the per-line errors
/// encountered along the way.
///
/// An empty catalog is a valid result — the caller decides whether that is
/// fatal.
pub fn parse_str(input: &str) -> (Catalog, Vec<ParseLineError>) {
    let mut catalog = Catalog::new();
    let mut errors = Vec::new();
    // Name of the most recently declared entry; branch annotations attach to it.
    let mut current: Option<String> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.starts_with(BRANCH_PREFIX) {
            // Branch annotation — checked before the generic `-` case so it
            // is never mistaken for an entry named "branch".
            let value = line[BRANCH_PREFIX.len()..].trim();
            if value.is_empty() {
                errors.push(ParseLineError::EmptyBranch { line: line_no });
                continue;
            }
            match &current {
                Some(name) => {
                    if let Some(entry) = catalog.get_mut(name) {
                        entry.branch = Some(value.to_string());
                    }
                }
                None => errors.push(ParseLineError::DanglingBranch { line: line_no }),
            }
        } else if line.starts_with('-') {
            // Entry declaration: name before the first colon, URL after.
            let Some((raw_name, raw_url)) = line.split_once(':') else {
                errors.push(ParseLineError::MissingColon {
                    line: line_no,
                    text: line.to_string(),
                });
                continue;
            };
            let name = raw_name.trim_matches([' ', '-']);
            if name.is_empty() {
                errors.push(ParseLineError::EmptyName {
                    line: line_no,
                    text: line.to_string(),
                });
                continue;
            }
            let url = raw_url.trim();
            if url.is_empty() {
                errors.push(ParseLineError::EmptyUrl {
                    line: line_no,
                    name: name.to_string(),
                });
                continue;
            }
            catalog.insert(
                name.to_string(),
                RepoEntry { name: name.to_string(), url: url.to_string(), branch: None },
            );
            current = Some(name.to_string());
        }
        // Blank lines and anything not starting with `-` are ignored.
    }

    (catalog, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_with_and_without_branch() {
        let input = "\
- repoA: https://example.com/a.git
  - branch: dev
- repoB: https://example.com/b.git
";
        let (catalog, errors) = parse_str(input);
        assert!(errors.is_empty());
        assert_eq!(catalog.len(), 2);

        let a = &catalog["repoA"];
        assert_eq!(a.url, "https://example.com/a.git");
        assert_eq!(a.branch.as_deref(), Some("dev"));

        let b = &catalog["repoB"];
        assert_eq!(b.url, "https://example.com/b.git");
        assert_eq!(b.branch, None, "branch applies only to the entry above it");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let (catalog, errors) = parse_str("- repo: https://host/path:8080/x.git");
        assert!(errors.is_empty());
        assert_eq!(catalog["repo"].url, "https://host/path:8080/x.git");
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let input = "\
- good: https://example.com/good.git
- noColonHere
- alsoGood: https://example.com/also.git
";
        let (catalog, errors) = parse_str(input);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains_key("good"));
        assert!(catalog.contains_key("alsoGood"));
        assert_eq!(
            errors,
            vec![ParseLineError::MissingColon { line: 2, text: "- noColonHere".to_string() }]
        );
    }

    #[test]
    fn empty_name_and_empty_url_are_rejected() {
        let input = "\
- : https://example.com/anon.git
- nourl:
";
        let (catalog, errors) = parse_str(input);
        assert!(catalog.is_empty());
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ParseLineError::EmptyName { line: 1, .. }));
        assert!(matches!(errors[1], ParseLineError::EmptyUrl { line: 2, .. }));
    }

    #[test]
    fn branch_before_any_entry_is_reported() {
        let (catalog, errors) = parse_str("- branch: dev\n");
        assert!(catalog.is_empty());
        assert_eq!(errors, vec![ParseLineError::DanglingBranch { line: 1 }]);
    }

    #[test]
    fn empty_branch_value_is_reported_and_entry_keeps_none() {
        let input = "\
- repo: https://example.com/r.git
  - branch:
";
        let (catalog, errors) = parse_str(input);
        assert_eq!(catalog["repo"].branch, None);
        assert_eq!(errors, vec![ParseLineError::EmptyBranch { line: 2 }]);
    }

    #[test]
    fn other_dashed_key_declares_a_new_entry() {
        // Deliberately permissive: any `- key: value` line that is not a
        // branch annotation declares a catalog entry named `key`.
        let input = "\
- repo: https://example.com/r.git
  - mirror: https://example.com/m.git
";
        let (catalog, errors) = parse_str(input);
        assert!(errors.is_empty());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["mirror"].url, "https://example.com/m.git");
    }

    #[test]
    fn branch_attaches_across_intervening_malformed_line() {
        let input = "\
- repo: https://example.com/r.git
- broken
  - branch: main
";
        let (catalog, errors) = parse_str(input);
        assert_eq!(catalog["repo"].branch.as_deref(), Some("main"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn blank_lines_and_prose_are_ignored() {
        let input = "\

repositories we depend on:

- repo: https://example.com/r.git

";
        let (catalog, errors) = parse_str(input);
        assert!(errors.is_empty());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_catalog() {
        let (catalog, errors) = parse_str("");
        assert!(catalog.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn duplicate_name_keeps_the_last_declaration() {
        let input = "\
- repo: https://example.com/first.git
- repo: https://example.com/second.git
";
        let (catalog, errors) = parse_str(input);
        assert!(errors.is_empty());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog["repo"].url, "https://example.com/second.git");
    }
}
