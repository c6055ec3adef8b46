//! # Repository Identity
//!
//! Derives the `owner/name` pair of a GitHub repository from a descriptor's
//! `url`. Matching is deliberately strict and literal: the url must start
//! with `https://github.com` and match `^https://github.com/(\S+)/(\S+)`.
//! The captured groups are used verbatim, so a `.git` suffix or extra path
//! segments end up in the identity (`https://github.com/a/b/c` yields owner
//! `a/b` and name `c`, since the first group is greedy).

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

/// Required prefix of every repository url.
pub const GITHUB_PREFIX: &str = "https://github.com";

const GITHUB_PATTERN: &str = r"^https://github.com/(\S+)/(\S+)";

/// The owner and name of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extract the identity from a descriptor url.
    ///
    /// Fails with [`Error::InvalidUrl`] when the url is absent, empty, lacks
    /// the `https://github.com` prefix, or does not match the pattern.
    pub fn from_url(url: Option<&str>) -> Result<Self> {
        let invalid = || Error::InvalidUrl {
            url: url.map(str::to_string),
        };

        let url = match url {
            Some(u) if !u.is_empty() && u.starts_with(GITHUB_PREFIX) => u,
            _ => return Err(invalid()),
        };

        let regex = Regex::new(GITHUB_PATTERN).map_err(Error::Regex)?;
        let captures = regex.captures(url).ok_or_else(invalid)?;

        match (captures.get(1), captures.get(2)) {
            (Some(owner), Some(name)) => Ok(Self::new(owner.as_str(), name.as_str())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
