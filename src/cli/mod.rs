//! Command-line interface for repo-fetch
//!
//! One flat command: pick a repository-list file, a destination directory,
//! and exactly one of `--all` / `--one <name>`.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use console::style;
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::catalog::parse_file;
use crate::clone::{clone_all, clone_one, CloneReport};

/// Clone a catalog of repositories listed in a plain-text file
#[derive(Parser)]
#[command(name = "repo-fetch")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("selection").args(["all", "one"]).required(true)))]
pub struct Cli {
    /// Path to the repository-list file
    #[arg(long, value_name = "PATH")]
    file: PathBuf,

    /// Destination root directory (created if absent)
    #[arg(long, value_name = "PATH")]
    localdir: PathBuf,

    /// Clone every repository in the file
    #[arg(long)]
    all: bool,

    /// Clone a single repository by name
    #[arg(long, value_name = "NAME")]
    one: Option<String>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let (catalog, parse_errors) = parse_file(&cli.file)?;
    for err in &parse_errors {
        warn!(%err, "skipped line in repository list");
    }
    if catalog.is_empty() {
        anyhow::bail!("No repositories found in file: {}", cli.file.display());
    }

    std::fs::create_dir_all(&cli.localdir)
        .with_context(|| format!("Failed creating directory: {}", cli.localdir.display()))?;

    if cli.all {
        let report = clone_all(&catalog, &cli.localdir)?;
        print_summary(&report);
    } else if let Some(name) = &cli.one {
        let entry = catalog.get(name).with_context(|| {
            format!("Repository {:?} not found in file: {}", name, cli.file.display())
        })?;
        clone_one(entry, &cli.localdir)?;
    }

    Ok(())
}

fn print_summary(report: &CloneReport) {
    println!(
        "\n{} {} cloned, {} skipped, {} failed",
        style("Done:").bold(),
        report.cloned(),
        report.skipped(),
        report.failed()
    );
}
