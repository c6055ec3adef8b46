//! # Run Configuration
//!
//! Settings that shape a single enrichment run.
//!
//! - [`ReconcilerConfig`] is handed to the reconciler at construction and
//!   toggles the optional parts of the fill policy.
//! - [`EnrichOptions`] collects what the pipeline needs around the
//!   reconciler: where the descriptor lives, which directory endpoint to ask,
//!   and whether the result is written back at all.

use std::path::PathBuf;

/// Toggles for the fill policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Point `<issueManagement>` at the repository's GitHub issues.
    pub use_issues: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self { use_issues: true }
    }
}

/// Options for one run of the enrichment pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Descriptor to enrich.
    pub pom_file: PathBuf,
    /// Base url of the repository directory API.
    pub api_url: String,
    /// Compute the enriched document without writing it.
    pub dry_run: bool,
    pub reconciler: ReconcilerConfig,
}
