//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `pom-enrich`. It uses the `thiserror` library to create an `Error` enum
//! that covers every failure mode of an enrichment run.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (the
//!   descriptor path, the offending url, the repository being looked up) to
//!   produce a useful message on its own.
//!
//! - **`ErrorKind`**: The coarse failure class of an `Error`. Callers branch
//!   on the kind rather than on individual variants: a missing descriptor is
//!   a graceful no-op, everything else aborts the run before the descriptor
//!   is written.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for pom-enrich operations
#[derive(Error, Debug)]
pub enum Error {
    /// The descriptor file does not exist.
    #[error("Pom '{path}' does not exist.")]
    DescriptorNotFound { path: String },

    /// The descriptor's `url` is absent or does not name a GitHub repository.
    #[error("url value '{}' is invalid. url format must be https://github.com/ownerName/repositoryName", url.as_deref().unwrap_or("null"))]
    InvalidUrl { url: Option<String> },

    /// The descriptor could not be read or is not well-formed XML.
    #[error("Exception thrown while reading pom '{path}': {message}")]
    DescriptorRead { path: String, message: String },

    /// The enriched descriptor could not be written back.
    #[error("Exception thrown while writing pom '{path}': {message}")]
    DescriptorWrite { path: String, message: String },

    /// The in-memory document tree rejected a modification.
    #[error("Document operation error: {message}")]
    Document { message: String },

    /// The repository directory lookup failed.
    ///
    /// Covers transport failures, non-success HTTP statuses (including a
    /// repository that does not exist) and payloads that could not be decoded.
    #[error("Exception thrown while communicating with repository directory ({repository}): {message}")]
    Remote { repository: String, message: String },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The descriptor file is absent. Not fatal.
    NotFound,
    /// The run is misconfigured; no remote call was made.
    ConfigInvalid,
    /// Reading, parsing or writing the descriptor failed.
    IoFailure,
    /// The repository directory could not provide facts.
    RemoteFailure,
}

impl Error {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DescriptorNotFound { .. } => ErrorKind::NotFound,
            Error::InvalidUrl { .. } | Error::Regex(_) | Error::UrlParse(_) => {
                ErrorKind::ConfigInvalid
            }
            Error::DescriptorRead { .. }
            | Error::DescriptorWrite { .. }
            | Error::Document { .. } => ErrorKind::IoFailure,
            Error::Remote { .. } => ErrorKind::RemoteFailure,
        }
    }

    /// Whether the run should end gracefully instead of failing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<xot::Error> for Error {
    fn from(err: xot::Error) -> Self {
        Error::Document {
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
