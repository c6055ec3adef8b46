//! # Enrich Command Implementation
//!
//! This module implements the `enrich` subcommand, which fills a `pom.xml`
//! with metadata from the GitHub repository its `<url>` points at.
//!
//! ## Functionality
//!
//! - **Curated fields**: `inceptionYear`, `developers` and `licenses` are only
//!   filled when the pom leaves them empty.
//! - **Mirrored fields**: `scm` and, unless `--no-issues` is given,
//!   `issueManagement` are always rewritten from the repository.
//! - **Dry Run**: `--dry-run` prints the enriched pom to stdout and leaves the
//!   file alone.
//!
//! A missing pom is reported and the command exits successfully. Any other
//! failure aborts before the pom is written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pom_enrich::config::{EnrichOptions, ReconcilerConfig};
use pom_enrich::defaults;
use pom_enrich::directory::GitHubDirectory;
use pom_enrich::enrich::{Enricher, Outcome};
use pom_enrich::output::{self, OutputConfig};
use pom_enrich::reconcile::MetadataReconciler;

/// Enrich a pom.xml from its GitHub repository
#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Path to the pom.xml to enrich.
    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        env = "POM_ENRICH_POM_FILE",
        default_value = defaults::DEFAULT_DESCRIPTOR_FILE
    )]
    pub pom_file: PathBuf,

    /// Do not point issueManagement at the repository's GitHub issues.
    #[arg(long)]
    pub no_issues: bool,

    /// Base url of the GitHub REST API.
    #[arg(
        long,
        value_name = "URL",
        env = "GITHUB_API_URL",
        default_value = defaults::DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Print the enriched pom instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl EnrichArgs {
    fn options(&self) -> EnrichOptions {
        EnrichOptions {
            pom_file: self.pom_file.clone(),
            api_url: self.api_url.clone(),
            dry_run: self.dry_run,
            reconciler: ReconcilerConfig {
                use_issues: !self.no_issues,
            },
        }
    }
}

/// Execute the `enrich` command.
pub fn execute(args: EnrichArgs, output: &OutputConfig) -> Result<()> {
    let options = args.options();

    let directory = GitHubDirectory::with_api_url(&options.api_url)?;
    let enricher = Enricher::new(MetadataReconciler::new(directory, options.reconciler));
    let outcome = enricher.enrich_file(&options.pom_file, options.dry_run)?;

    let summary = output::summarize(output, &options.pom_file, &outcome);
    match &outcome {
        Outcome::Preview { xml, .. } => {
            // Keep stdout a clean document.
            print!("{}", xml);
            if !args.quiet {
                eprintln!("{}", summary);
            }
        }
        _ => {
            if !args.quiet {
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
