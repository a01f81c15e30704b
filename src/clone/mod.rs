//! Clone dispatch: invoking the external `git` client per catalog entry
//!
//! Each entry is attempted exactly once per invocation and transitions
//! `Pending -> Skipped` (target directory already exists) or
//! `Pending -> Cloning -> {Cloned, Failed}`. Entries are processed
//! sequentially; a failure never aborts the rest of a batch.

use crate::catalog::{Catalog, RepoEntry};
use anyhow::Result;
use console::style;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Terminal state of one clone attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// Target directory already exists; no `git` invocation was made.
    Skipped,
    Cloned,
    /// `git` exited non-zero or could not be launched.
    Failed { reason: String },
}

/// Per-entry outcomes of a batch clone, with aggregate counts.
#[derive(Debug, Default)]
pub struct CloneReport {
    pub outcomes: Vec<(String, CloneOutcome)>,
}

impl CloneReport {
    pub fn cloned(&self) -> usize {
        self.count(|o| matches!(o, CloneOutcome::Cloned))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CloneOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CloneOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&CloneOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Build the argv passed to `git` for one entry: `clone <url> <target>`,
/// plus `-b <branch>` when the entry pins a branch.
pub fn clone_args(entry: &RepoEntry, target: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> =
        vec!["clone".into(), entry.url.clone().into(), target.as_os_str().to_os_string()];
    if let Some(branch) = &entry.branch {
        args.push("-b".into());
        args.push(branch.clone().into());
    }
    args
}

/// Clone one entry into `local_dir/<name>`.
///
/// If the target directory already exists this is a no-op reported as
/// [`CloneOutcome::Skipped`]. The `git` subprocess inherits stdout/stderr so
/// its own progress output passes through untouched.
pub fn clone_one(entry: &RepoEntry, local_dir: &Path) -> Result<CloneOutcome> {
    let target = local_dir.join(&entry.name);

    println!(
        "Cloning {} from {} to {}...",
        style(&entry.name).bold(),
        entry.url,
        target.display()
    );

    if target.exists() {
        println!("  {} {} already exists", style("skipped:").yellow(), target.display());
        return Ok(CloneOutcome::Skipped);
    }

    let args = clone_args(entry, &target);
    debug!(name = %entry.name, ?args, "invoking git");

    // Blocking call; the existence check above and this invocation are not
    // atomic, which is acceptable for single-user CLI usage.
    let status = match Command::new("git").args(&args).status() {
        Ok(status) => status,
        Err(err) => {
            let reason = format!("failed to launch git: {err}");
            warn!(name = %entry.name, %reason, "clone failed");
            println!("  {} {}", style("failed:").red(), reason);
            return Ok(CloneOutcome::Failed { reason });
        }
    };

    if status.success() {
        println!("  {} {}", style("cloned:").green(), entry.name);
        Ok(CloneOutcome::Cloned)
    } else {
        let reason = format!("git exited with {status}");
        warn!(name = %entry.name, %reason, "clone failed");
        println!("  {} {}", style("failed:").red(), reason);
        Ok(CloneOutcome::Failed { reason })
    }
}

/// Clone every catalog entry in name order, one at a time.
///
/// Best-effort: per-entry failures are recorded in the report and the
/// remaining entries are still attempted.
pub fn clone_all(catalog: &Catalog, local_dir: &Path) -> Result<CloneReport> {
    let mut report = CloneReport::default();
    for entry in catalog.values() {
        let outcome = clone_one(entry, local_dir)?;
        report.outcomes.push((entry.name.clone(), outcome));
    }
    Ok(report)
}
