//! # Repository Directory
//!
//! Source of [`RepositoryFacts`] for a [`RepositoryIdentity`]. The
//! [`RepositoryDirectory`] trait is the seam the reconciler depends on;
//! [`GitHubDirectory`] implements it against the public GitHub REST API with
//! anonymous requests.
//!
//! A lookup is a single attempt. Transport failures, non-success statuses
//! (a repository that does not exist answers 404) and undecodable payloads are
//! all reported as [`Error::Remote`], with no retry and no partial result.

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};
use crate::identity::RepositoryIdentity;

/// Snapshot of the repository metadata used to fill a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFacts {
    pub created_at: DateTime<Utc>,
    pub owner: OwnerProfile,
    pub license: Option<LicenseInfo>,
    /// Browser url of the repository.
    pub web_url: String,
    pub git_http_url: String,
    pub git_ssh_url: String,
}

/// The account that owns the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    /// Display name; accounts without one report `None`.
    pub name: Option<String>,
    /// Public email, if the account publishes one.
    pub email: Option<String>,
    pub profile_url: String,
}

/// License detected on the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseInfo {
    pub name: String,
    pub url: Option<String>,
}

/// Looks up repository facts by identity.
pub trait RepositoryDirectory {
    fn lookup(&self, identity: &RepositoryIdentity) -> Result<RepositoryFacts>;
}

impl<D: RepositoryDirectory + ?Sized> RepositoryDirectory for &D {
    fn lookup(&self, identity: &RepositoryIdentity) -> Result<RepositoryFacts> {
        (**self).lookup(identity)
    }
}

/// `GET /repos/{owner}/{repo}` payload, reduced to the fields we use.
#[derive(Debug, Deserialize)]
struct RepoPayload {
    created_at: DateTime<Utc>,
    html_url: String,
    clone_url: String,
    ssh_url: String,
    owner: RepoOwnerPayload,
    license: Option<LicensePayload>,
}

#[derive(Debug, Deserialize)]
struct RepoOwnerPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct LicensePayload {
    name: String,
    url: Option<String>,
}

/// `GET /users/{login}` payload.
#[derive(Debug, Deserialize)]
struct UserPayload {
    html_url: String,
    name: Option<String>,
    email: Option<String>,
}

fn facts_from_payloads(repo: RepoPayload, owner: UserPayload) -> RepositoryFacts {
    RepositoryFacts {
        created_at: repo.created_at,
        owner: OwnerProfile {
            name: owner.name,
            email: owner.email,
            profile_url: owner.html_url,
        },
        license: repo.license.map(|l| LicenseInfo {
            name: l.name,
            url: l.url,
        }),
        web_url: repo.html_url,
        git_http_url: repo.clone_url,
        git_ssh_url: repo.ssh_url,
    }
}

/// Anonymous client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubDirectory {
    client: Client,
    api_url: Url,
}

impl GitHubDirectory {
    /// Create a directory against the API rooted at `api_url`, such as
    /// `https://api.github.com` or a GitHub Enterprise `/api/v3` endpoint.
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let mut api_url = Url::parse(api_url)?;
        // `Url::join` replaces the last segment unless the base ends with '/'
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Remote {
                repository: api_url.to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, identity: &RepositoryIdentity) -> Result<T> {
        let remote = |message: String| Error::Remote {
            repository: identity.to_string(),
            message,
        };

        let url = self.api_url.join(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, defaults::USER_AGENT)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| remote(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote(format!("{} returned HTTP status {}", url, status)));
        }

        let body = response
            .text()
            .map_err(|e| remote(format!("failed to read response from {}: {}", url, e)))?;
        serde_json::from_str(&body)
            .map_err(|e| remote(format!("invalid response from {}: {}", url, e)))
    }
}

impl RepositoryDirectory for GitHubDirectory {
    fn lookup(&self, identity: &RepositoryIdentity) -> Result<RepositoryFacts> {
        let repo: RepoPayload = self.get_json(
            &format!("repos/{}/{}", identity.owner, identity.name),
            identity,
        )?;
        let owner: UserPayload = self.get_json(&format!("users/{}", repo.owner.login), identity)?;

        Ok(facts_from_payloads(repo, owner))
    }
}
