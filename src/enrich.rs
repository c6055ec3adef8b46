//! # Enrichment Pipeline
//!
//! One enrichment run, start to finish:
//!
//! 1.  **Load**: Parse the descriptor file. A missing file ends the run
//!     quietly with [`Outcome::Missing`].
//! 2.  **Reconcile**: Derive the repository identity, fetch its facts and
//!     apply the fill policy to the in-memory descriptor.
//! 3.  **Write**: Put the changed fields back into the document and replace
//!     the file, or hand the document back untouched in dry-run mode.
//!
//! Nothing is written until every field has been computed, so any failure
//! leaves the descriptor file exactly as it was.

use std::path::Path;

use log::{error, info};

use crate::directory::RepositoryDirectory;
use crate::document::PomDocument;
use crate::error::Result;
use crate::reconcile::{Field, MetadataReconciler};

/// What a run did with the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The descriptor file does not exist; nothing was done.
    Missing,
    /// The descriptor already carried the repository metadata.
    Unchanged,
    /// The descriptor was rewritten with these fields changed.
    Written { changed: Vec<Field> },
    /// Dry run: the enriched document that would have been written.
    Preview { changed: Vec<Field>, xml: String },
}

/// Runs the load, reconcile and write steps against one directory.
pub struct Enricher<D> {
    reconciler: MetadataReconciler<D>,
}

impl<D: RepositoryDirectory> Enricher<D> {
    pub fn new(reconciler: MetadataReconciler<D>) -> Self {
        Self { reconciler }
    }

    /// Enrich the descriptor at `path`.
    ///
    /// With `dry_run` set the file is never written.
    pub fn enrich_file(&self, path: &Path, dry_run: bool) -> Result<Outcome> {
        let mut document = match PomDocument::load(path) {
            Ok(document) => document,
            Err(e) if e.is_not_found() => {
                error!("{}", e);
                return Ok(Outcome::Missing);
            }
            Err(e) => return Err(e),
        };

        let mut descriptor = document.descriptor().clone();
        let changed = self.reconciler.reconcile(&mut descriptor)?;
        document.update(&descriptor)?;

        if dry_run {
            let xml = document.to_xml_string()?;
            return Ok(Outcome::Preview { changed, xml });
        }

        if changed.is_empty() {
            info!("{} is up to date", path.display());
            return Ok(Outcome::Unchanged);
        }

        document.save(path)?;
        for field in &changed {
            info!("updated {}", field);
        }
        Ok(Outcome::Written { changed })
    }
}
