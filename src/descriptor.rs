//! In-memory model of the project descriptor.
//!
//! Only the parts of a `pom.xml` that enrichment reads or fills are modeled
//! here. Everything else stays in the document tree held by
//! [`crate::document::PomDocument`] and is written back untouched.

/// The enrichable view of a project descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// The project's home page. Source of the repository identity; never
    /// modified by enrichment.
    pub url: Option<String>,
    pub inception_year: Option<String>,
    pub developers: Vec<Developer>,
    pub issue_tracker: Option<IssueTracker>,
    pub licenses: Vec<License>,
    pub scm: Option<Scm>,
}

/// A `<developer>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Developer {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Profile page of the developer.
    pub url: Option<String>,
    pub roles: Vec<String>,
}

/// A `<license>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
    /// How the license may be distributed (`repo` or `manual`).
    pub distribution: Option<String>,
}

/// The `<issueManagement>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTracker {
    pub system: Option<String>,
    pub url: Option<String>,
}

/// The `<scm>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scm {
    pub url: Option<String>,
    pub connection: Option<String>,
    pub developer_connection: Option<String>,
}

impl ProjectDescriptor {
    /// True when the inception year is missing or blank.
    pub fn inception_year_is_blank(&self) -> bool {
        is_blank(self.inception_year.as_deref())
    }
}

/// True when `value` is absent or contains only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
