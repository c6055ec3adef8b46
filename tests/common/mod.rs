//! Shared test utilities for the CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_pom(poms::MINIMAL);
//!     fixture.command().arg("enrich").assert().success();
//! }
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::github;
    #[allow(unused_imports)]
    pub use super::poms;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::UNREACHABLE_API;
}

/// An API base url nothing listens on, so lookups fail fast without
/// touching the network.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Descriptor snippets for testing.
#[allow(dead_code)]
pub mod poms {
    /// A pom pointing at a GitHub repository, with nothing to preserve.
    pub const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <version>1.0.0</version>
  <url>https://github.com/acme/widget</url>
</project>
"#;

    /// A pom whose url is not a GitHub repository.
    pub const INVALID_URL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <artifactId>widget</artifactId>
  <url>not-a-url</url>
</project>
"#;

    /// A pom without any url.
    pub const NO_URL: &str = r#"<project>
  <modelVersion>4.0.0</modelVersion>
  <artifactId>widget</artifactId>
</project>
"#;

    /// Not well-formed XML.
    pub const MALFORMED: &str = "<project><url>https://github.com/acme/widget</url>";
}

/// A stand-in for the GitHub REST API serving the `acme/widget` repository.
#[allow(dead_code)]
pub mod github {
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Start a server answering the repository and owner lookups for
    /// `acme/widget`. Anything else answers 404.
    pub async fn acme_server() -> MockServer {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "widget",
                "full_name": "acme/widget",
                "owner": { "login": "acme" },
                "html_url": "https://github.com/acme/widget",
                "clone_url": "https://github.com/acme/widget.git",
                "ssh_url": "git@github.com:acme/widget.git",
                "created_at": "2020-05-01T00:00:00Z",
                "license": { "name": "MIT", "url": "https://opensource.org/MIT" }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/users/acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "acme",
                "name": "Acme Corp",
                "email": null,
                "html_url": "https://github.com/acme"
            })))
            .mount(&server)
            .await;

        server
    }
}

/// A temporary working directory for one CLI invocation.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `pom.xml` with the given content.
    pub fn with_pom(self, content: &str) -> Self {
        self.temp_dir
            .child("pom.xml")
            .write_str(content)
            .expect("Failed to write pom.xml");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the pom.
    pub fn pom_path(&self) -> PathBuf {
        self.temp_dir.path().join("pom.xml")
    }

    /// Current content of the pom.
    pub fn pom_content(&self) -> String {
        std::fs::read_to_string(self.pom_path()).expect("Failed to read pom.xml")
    }

    /// A `pom-enrich` command running in the fixture directory, isolated
    /// from environment overrides.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pom-enrich");
        cmd.current_dir(self.path())
            .env_remove("POM_ENRICH_POM_FILE")
            .env_remove("RUST_LOG")
            .env("GITHUB_API_URL", UNREACHABLE_API);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
