//! # Metadata Reconciliation
//!
//! Applies repository facts to a [`ProjectDescriptor`].
//!
//! ## Fill Policy
//!
//! Fields are visited in a fixed order against one facts snapshot:
//!
//! 1.  **Inception year**: filled with the UTC year the repository was
//!     created, only when blank.
//! 2.  **Developers**: when the list is empty, a single maintainer built from
//!     the repository owner. A non-empty list is never touched.
//! 3.  **Issue tracker**: when enabled, always set to the repository's GitHub
//!     issues page.
//! 4.  **Licenses**: when the list is empty and the repository has a
//!     detected license, a single `repo`-distributed license.
//! 5.  **SCM**: always replaced with the repository's web and git urls.
//!
//! Inception year, developers and licenses are curated by the project and
//! only ever filled. Issue tracker and SCM mirror the remote and are
//! recomputed every run, which keeps repeated runs stable.

use std::fmt;

use chrono::Datelike;
use log::info;

use crate::config::ReconcilerConfig;
use crate::descriptor::{Developer, IssueTracker, License, ProjectDescriptor, Scm};
use crate::directory::{RepositoryDirectory, RepositoryFacts};
use crate::error::Result;
use crate::identity::RepositoryIdentity;

pub const MAINTAINER_ROLE: &str = "maintainer";
pub const ISSUE_SYSTEM: &str = "github";
pub const LICENSE_DISTRIBUTION: &str = "repo";
pub const SCM_GIT_PREFIX: &str = "scm:git:";

/// A descriptor field the fill policy may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    InceptionYear,
    Developers,
    IssueTracker,
    Licenses,
    Scm,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::InceptionYear => "inceptionYear",
            Field::Developers => "developers",
            Field::IssueTracker => "issueManagement",
            Field::Licenses => "licenses",
            Field::Scm => "scm",
        };
        f.write_str(name)
    }
}

/// Apply `facts` to `descriptor` and return the fields whose value changed.
pub fn apply_facts(
    descriptor: &mut ProjectDescriptor,
    facts: &RepositoryFacts,
    config: &ReconcilerConfig,
) -> Vec<Field> {
    let mut changed = Vec::new();

    if descriptor.inception_year_is_blank() {
        let year = format!("{:04}", facts.created_at.year());
        if descriptor.inception_year.as_deref() != Some(year.as_str()) {
            changed.push(Field::InceptionYear);
        }
        descriptor.inception_year = Some(year);
    }

    if descriptor.developers.is_empty() {
        let owner = &facts.owner;
        descriptor.developers = vec![Developer {
            name: owner.name.clone(),
            email: owner.email.clone().filter(|e| !e.is_empty()),
            url: Some(owner.profile_url.clone()),
            roles: vec![MAINTAINER_ROLE.to_string()],
        }];
        changed.push(Field::Developers);
    }

    if config.use_issues {
        let tracker = descriptor
            .issue_tracker
            .get_or_insert_with(IssueTracker::default);
        let before = tracker.clone();
        tracker.system = Some(ISSUE_SYSTEM.to_string());
        tracker.url = Some(format!("{}/issues", facts.web_url));
        if *tracker != before {
            changed.push(Field::IssueTracker);
        }
    }

    if descriptor.licenses.is_empty() {
        if let Some(license) = &facts.license {
            descriptor.licenses = vec![License {
                name: Some(license.name.clone()),
                url: license.url.clone(),
                distribution: Some(LICENSE_DISTRIBUTION.to_string()),
            }];
            changed.push(Field::Licenses);
        }
    }

    let scm = Scm {
        url: Some(facts.web_url.clone()),
        connection: Some(format!("{}{}", SCM_GIT_PREFIX, facts.git_http_url)),
        developer_connection: Some(format!("{}{}", SCM_GIT_PREFIX, facts.git_ssh_url)),
    };
    if descriptor.scm.as_ref() != Some(&scm) {
        changed.push(Field::Scm);
    }
    descriptor.scm = Some(scm);

    changed
}

/// Fills a descriptor from the repository its `url` points at.
pub struct MetadataReconciler<D> {
    directory: D,
    config: ReconcilerConfig,
}

impl<D: RepositoryDirectory> MetadataReconciler<D> {
    pub fn new(directory: D, config: ReconcilerConfig) -> Self {
        Self { directory, config }
    }

    /// Look up the descriptor's repository and apply the fill policy.
    ///
    /// The identity is validated before the directory is consulted, so an
    /// invalid `url` never causes a remote call. On error the descriptor is
    /// left as it was.
    pub fn reconcile(&self, descriptor: &mut ProjectDescriptor) -> Result<Vec<Field>> {
        let identity = RepositoryIdentity::from_url(descriptor.url.as_deref())?;
        info!(
            "ownerName = {} repositoryName = {}",
            identity.owner, identity.name
        );

        let facts = self.directory.lookup(&identity)?;
        Ok(apply_facts(descriptor, &facts, &self.config))
    }
}
