//! # pom-enrich
//!
//! This library fills a Maven `pom.xml` with project metadata taken from the
//! GitHub repository named by its `<url>`. It backs the `pom-enrich`
//! command-line tool but can be embedded in other build tooling.
//!
//! ## Quick Example
//!
//! ```
//! use pom_enrich::identity::RepositoryIdentity;
//!
//! let identity = RepositoryIdentity::from_url(Some("https://github.com/acme/widget")).unwrap();
//! assert_eq!(identity.owner, "acme");
//! assert_eq!(identity.name, "widget");
//!
//! assert!(RepositoryIdentity::from_url(Some("not-a-url")).is_err());
//! ```
//!
//! ## Core Concepts
//!
//! - **Descriptor (`descriptor`)**: The part of the project model that
//!   enrichment reads and fills.
//! - **Document (`document`)**: Loads the `pom.xml` tree, exposes it as a
//!   descriptor, and writes changed fields back without disturbing the rest.
//! - **Identity (`identity`)**: The owner and name of the repository, derived
//!   from the descriptor's `url` with one strict pattern.
//! - **Directory (`directory`)**: Where repository facts come from; the GitHub
//!   REST API in production.
//! - **Reconciliation (`reconcile`)**: The fill policy deciding, per field,
//!   whether remote facts fill a gap or overwrite.
//!
//! ## Execution Flow
//!
//! The entry point is [`enrich::Enricher::enrich_file`]:
//!
//! 1.  **Load** the descriptor; a missing file is a quiet no-op.
//! 2.  **Identify** the repository from `<url>`; an invalid url aborts
//!     before any remote call.
//! 3.  **Fetch** the repository facts.
//! 4.  **Reconcile** the descriptor with the facts.
//! 5.  **Write** the changed fields back to the file.

pub mod config;
pub mod defaults;
pub mod descriptor;
pub mod directory;
pub mod document;
pub mod enrich;
pub mod error;
pub mod identity;
pub mod output;
pub mod reconcile;

#[cfg(test)]
mod identity_proptest;
