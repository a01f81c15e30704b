//! repo-fetch: Clone a catalog of repositories listed in a plain-text file
//!
//! This tool parses a simple line-oriented repository list (name, URL,
//! optional branch) and clones the requested entries into a local directory
//! by invoking the external `git` client, skipping entries that are already
//! present on disk.

use anyhow::Result;

mod catalog;
mod cli;
mod clone;

fn main() -> Result<()> {
    cli::run()
}
