//! Default values for pom-enrich configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Conventional descriptor file name, resolved against the working directory.
pub const DEFAULT_DESCRIPTOR_FILE: &str = "pom.xml";

/// Base url of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// `User-Agent` sent with every directory request. GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("pom-enrich/", env!("CARGO_PKG_VERSION"));
