//! # Descriptor Document
//!
//! Reads a Maven `pom.xml` into a [`ProjectDescriptor`] and writes the
//! enriched descriptor back into the same document.
//!
//! The whole XML tree is kept in memory with `xot`. Writing back only touches
//! the elements whose modeled value changed since the document was loaded:
//! unrelated elements, comments and the layout of everything else survive a
//! round trip. New elements are placed at their conventional position among
//! the `<project>` children and indented like their siblings.
//!
//! Documents with no namespace and documents in the POM 4.0.0 or 4.1.0
//! namespace are accepted; the root element must be `<project>`.

use std::fs;
use std::path::Path;

use xot::{NameId, NamespaceId, Node, Xot};

use crate::descriptor::{Developer, IssueTracker, License, ProjectDescriptor, Scm};
use crate::error::{Error, Result};

const POM_NAMESPACES: &[&str] = &[
    "http://maven.apache.org/POM/4.0.0",
    "http://maven.apache.org/POM/4.1.0",
];

/// Conventional order of `<project>` children.
const PROJECT_ELEMENT_ORDER: &[&str] = &[
    "modelVersion",
    "parent",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "name",
    "description",
    "url",
    "inceptionYear",
    "organization",
    "licenses",
    "developers",
    "contributors",
    "mailingLists",
    "prerequisites",
    "modules",
    "scm",
    "issueManagement",
    "ciManagement",
    "distributionManagement",
    "properties",
    "dependencyManagement",
    "dependencies",
    "repositories",
    "pluginRepositories",
    "build",
    "reporting",
    "profiles",
];

const DEFAULT_INDENT: &str = "  ";

/// Element names used by the descriptor, resolved in the document's namespace.
#[derive(Debug, Clone, Copy)]
struct PomNames {
    url: NameId,
    inception_year: NameId,
    developers: NameId,
    developer: NameId,
    name: NameId,
    email: NameId,
    roles: NameId,
    role: NameId,
    issue_management: NameId,
    system: NameId,
    licenses: NameId,
    license: NameId,
    distribution: NameId,
    scm: NameId,
    connection: NameId,
    developer_connection: NameId,
}

impl PomNames {
    fn register(xot: &mut Xot, ns: Option<NamespaceId>) -> Self {
        let mut name = |local: &str| qualified_name(&mut *xot, ns, local);
        Self {
            url: name("url"),
            inception_year: name("inceptionYear"),
            developers: name("developers"),
            developer: name("developer"),
            name: name("name"),
            email: name("email"),
            roles: name("roles"),
            role: name("role"),
            issue_management: name("issueManagement"),
            system: name("system"),
            licenses: name("licenses"),
            license: name("license"),
            distribution: name("distribution"),
            scm: name("scm"),
            connection: name("connection"),
            developer_connection: name("developerConnection"),
        }
    }
}

fn qualified_name(xot: &mut Xot, ns: Option<NamespaceId>, local: &str) -> NameId {
    match ns {
        Some(ns) => xot.add_name_ns(local, ns),
        None => xot.add_name(local),
    }
}

/// Content of an element built from the model.
enum Content {
    Text(String),
    Elements(Vec<(NameId, Content)>),
}

fn push_text(fields: &mut Vec<(NameId, Content)>, name: NameId, value: &Option<String>) {
    if let Some(value) = value {
        fields.push((name, Content::Text(value.clone())));
    }
}

/// A parsed `pom.xml` together with the descriptor it was loaded as.
pub struct PomDocument {
    xot: Xot,
    project: Node,
    names: PomNames,
    project_order: Vec<NameId>,
    prolog: String,
    epilog: String,
    crlf: bool,
    indent: String,
    loaded: ProjectDescriptor,
}

impl PomDocument {
    /// Load the descriptor at `path`.
    ///
    /// A missing file is reported as [`Error::DescriptorNotFound`]; unreadable
    /// or malformed content as [`Error::DescriptorRead`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DescriptorNotFound {
                path: path.display().to_string(),
            });
        }

        let read_error = |message: String| Error::DescriptorRead {
            path: path.display().to_string(),
            message,
        };

        let source = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        Self::parse(&source).map_err(|e| match e {
            Error::Document { message } => read_error(message),
            other => other,
        })
    }

    /// Parse a descriptor from XML text.
    pub fn parse(source: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot.parse(source).map_err(|e| Error::Document {
            message: e.to_string(),
        })?;
        let project = xot.document_element(document)?;

        let root_name = xot
            .element(project)
            .map(|element| element.name())
            .ok_or_else(|| Error::Document {
                message: "document has no root element".to_string(),
            })?;
        let ns = detect_namespace(&mut xot, root_name).ok_or_else(|| Error::Document {
            message: "root element is not a Maven <project>".to_string(),
        })?;

        let names = PomNames::register(&mut xot, ns);
        let project_order = PROJECT_ELEMENT_ORDER
            .iter()
            .map(|local| qualified_name(&mut xot, ns, local))
            .collect();

        let mut pom = Self {
            xot,
            project,
            names,
            project_order,
            prolog: prolog(source).to_string(),
            epilog: epilog(source).to_string(),
            crlf: source.contains("\r\n"),
            indent: String::new(),
            loaded: ProjectDescriptor::default(),
        };
        pom.indent = pom.detect_indent();
        pom.loaded = pom.read_descriptor();
        Ok(pom)
    }

    /// The descriptor as it was loaded or last written back.
    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.loaded
    }

    /// Write the fields of `descriptor` that differ from the loaded
    /// descriptor into the document tree.
    ///
    /// The `url` is never written.
    pub fn update(&mut self, descriptor: &ProjectDescriptor) -> Result<()> {
        let loaded = self.loaded.clone();
        let n = self.names;

        if descriptor.inception_year != loaded.inception_year {
            match &descriptor.inception_year {
                Some(year) => self.set_project_text(n.inception_year, year)?,
                None => self.remove_child(self.project, n.inception_year)?,
            }
        }

        if descriptor.developers != loaded.developers {
            let content = self.developers_content(&descriptor.developers);
            self.put_project_child(n.developers, content)?;
        }

        if descriptor.issue_tracker != loaded.issue_tracker {
            match &descriptor.issue_tracker {
                Some(tracker) => self.write_issue_tracker(tracker)?,
                None => self.remove_child(self.project, n.issue_management)?,
            }
        }

        if descriptor.licenses != loaded.licenses {
            let content = self.licenses_content(&descriptor.licenses);
            self.put_project_child(n.licenses, content)?;
        }

        if descriptor.scm != loaded.scm {
            let content = descriptor.scm.as_ref().map(|scm| self.scm_content(scm));
            self.put_project_child(n.scm, content)?;
        }

        self.loaded = ProjectDescriptor {
            url: loaded.url,
            ..descriptor.clone()
        };
        Ok(())
    }

    /// Serialize the document.
    ///
    /// Text before and after the root element is reproduced verbatim. A
    /// source with CRLF line endings is written back with CRLF throughout.
    pub fn to_xml_string(&self) -> Result<String> {
        let out = format!(
            "{}{}{}",
            self.prolog,
            self.xot.to_string(self.project)?,
            self.epilog
        );
        if self.crlf {
            // The parser hands element content back with bare LF.
            return Ok(out.replace("\r\n", "\n").replace('\n', "\r\n"));
        }
        Ok(out)
    }

    /// Write the document to `path`, replacing its content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(path, xml).map_err(|e| Error::DescriptorWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    fn read_descriptor(&self) -> ProjectDescriptor {
        let n = &self.names;
        let project = self.project;

        let developers = self
            .child(project, n.developers)
            .map(|list| {
                self.children_named(list, n.developer)
                    .into_iter()
                    .map(|d| Developer {
                        name: self.child_text(d, n.name),
                        email: self.child_text(d, n.email),
                        url: self.child_text(d, n.url),
                        roles: self
                            .child(d, n.roles)
                            .map(|roles| {
                                self.children_named(roles, n.role)
                                    .into_iter()
                                    .map(|r| self.text(r))
                                    .collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let licenses = self
            .child(project, n.licenses)
            .map(|list| {
                self.children_named(list, n.license)
                    .into_iter()
                    .map(|l| License {
                        name: self.child_text(l, n.name),
                        url: self.child_text(l, n.url),
                        distribution: self.child_text(l, n.distribution),
                    })
                    .collect()
            })
            .unwrap_or_default();

        ProjectDescriptor {
            url: self.child_text(project, n.url),
            inception_year: self.child_text(project, n.inception_year),
            developers,
            issue_tracker: self.child(project, n.issue_management).map(|i| IssueTracker {
                system: self.child_text(i, n.system),
                url: self.child_text(i, n.url),
            }),
            licenses,
            scm: self.child(project, n.scm).map(|s| Scm {
                url: self.child_text(s, n.url),
                connection: self.child_text(s, n.connection),
                developer_connection: self.child_text(s, n.developer_connection),
            }),
        }
    }

    fn is_named(&self, node: Node, name: NameId) -> bool {
        self.xot
            .element(node)
            .is_some_and(|element| element.name() == name)
    }

    fn child(&self, parent: Node, name: NameId) -> Option<Node> {
        self.xot
            .children(parent)
            .find(|&child| self.is_named(child, name))
    }

    fn children_named(&self, parent: Node, name: NameId) -> Vec<Node> {
        self.xot
            .children(parent)
            .filter(|&child| self.is_named(child, name))
            .collect()
    }

    /// Trimmed text directly inside `node`.
    fn text(&self, node: Node) -> String {
        self.xot
            .children(node)
            .filter_map(|child| self.xot.text_str(child))
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn child_text(&self, parent: Node, name: NameId) -> Option<String> {
        self.child(parent, name).map(|node| self.text(node))
    }

    /// Indentation unit, taken from the whitespace before the first
    /// `<project>` child element.
    fn detect_indent(&self) -> String {
        self.xot
            .children(self.project)
            .find_map(|child| self.xot.text_str(child))
            .and_then(|ws| ws.rsplit('\n').next())
            .filter(|unit| !unit.is_empty() && unit.trim().is_empty())
            .unwrap_or(DEFAULT_INDENT)
            .to_string()
    }

    // ------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------

    fn newline(&self, depth: usize) -> String {
        format!("\n{}", self.indent.repeat(depth))
    }

    fn developers_content(&self, developers: &[Developer]) -> Option<Content> {
        if developers.is_empty() {
            return None;
        }
        let n = &self.names;
        let entries = developers
            .iter()
            .map(|d| {
                let mut fields = Vec::new();
                push_text(&mut fields, n.name, &d.name);
                push_text(&mut fields, n.email, &d.email);
                push_text(&mut fields, n.url, &d.url);
                if !d.roles.is_empty() {
                    let roles = d
                        .roles
                        .iter()
                        .map(|role| (n.role, Content::Text(role.clone())))
                        .collect();
                    fields.push((n.roles, Content::Elements(roles)));
                }
                (n.developer, Content::Elements(fields))
            })
            .collect();
        Some(Content::Elements(entries))
    }

    fn licenses_content(&self, licenses: &[License]) -> Option<Content> {
        if licenses.is_empty() {
            return None;
        }
        let n = &self.names;
        let entries = licenses
            .iter()
            .map(|l| {
                let mut fields = Vec::new();
                push_text(&mut fields, n.name, &l.name);
                push_text(&mut fields, n.url, &l.url);
                push_text(&mut fields, n.distribution, &l.distribution);
                (n.license, Content::Elements(fields))
            })
            .collect();
        Some(Content::Elements(entries))
    }

    fn scm_content(&self, scm: &Scm) -> Content {
        let n = &self.names;
        let mut fields = Vec::new();
        push_text(&mut fields, n.connection, &scm.connection);
        push_text(&mut fields, n.developer_connection, &scm.developer_connection);
        push_text(&mut fields, n.url, &scm.url);
        Content::Elements(fields)
    }

    fn build(&mut self, name: NameId, content: &Content, depth: usize) -> Result<Node> {
        let node = self.xot.new_element(name);
        match content {
            Content::Text(text) => {
                let text = self.xot.new_text(text);
                self.xot.append(node, text)?;
            }
            Content::Elements(children) => {
                for (child_name, child_content) in children {
                    let ws = self.newline(depth + 1);
                    let ws = self.xot.new_text(&ws);
                    self.xot.append(node, ws)?;
                    let child = self.build(*child_name, child_content, depth + 1)?;
                    self.xot.append(node, child)?;
                }
                if !children.is_empty() {
                    let ws = self.newline(depth);
                    let ws = self.xot.new_text(&ws);
                    self.xot.append(node, ws)?;
                }
            }
        }
        Ok(node)
    }

    /// Replace the `<project>` child `name` with freshly built `content`,
    /// or remove it when `content` is `None`.
    fn put_project_child(&mut self, name: NameId, content: Option<Content>) -> Result<()> {
        let Some(content) = content else {
            return self.remove_child(self.project, name);
        };

        let node = self.build(name, &content, 1)?;
        match self.child(self.project, name) {
            Some(existing) => {
                self.xot.insert_before(existing, node)?;
                self.xot.remove(existing)?;
                Ok(())
            }
            None => {
                let anchor = self.project_anchor(name);
                self.insert_child(self.project, node, anchor, 1)
            }
        }
    }

    fn set_project_text(&mut self, name: NameId, value: &str) -> Result<()> {
        match self.child(self.project, name) {
            Some(existing) => self.set_text(existing, value),
            None => {
                let node = self.build(name, &Content::Text(value.to_string()), 1)?;
                let anchor = self.project_anchor(name);
                self.insert_child(self.project, node, anchor, 1)
            }
        }
    }

    fn write_issue_tracker(&mut self, tracker: &IssueTracker) -> Result<()> {
        let n = self.names;
        let node = match self.child(self.project, n.issue_management) {
            Some(node) => node,
            None => {
                let node = self.build(n.issue_management, &Content::Elements(Vec::new()), 1)?;
                let anchor = self.project_anchor(n.issue_management);
                self.insert_child(self.project, node, anchor, 1)?;
                node
            }
        };

        match &tracker.system {
            Some(system) => {
                let anchor = self.child(node, n.url);
                self.set_nested_text(node, n.system, system, anchor, 2)?;
            }
            None => self.remove_child(node, n.system)?,
        }
        match &tracker.url {
            Some(url) => self.set_nested_text(node, n.url, url, None, 2)?,
            None => self.remove_child(node, n.url)?,
        }
        Ok(())
    }

    fn set_nested_text(
        &mut self,
        parent: Node,
        name: NameId,
        value: &str,
        anchor: Option<Node>,
        depth: usize,
    ) -> Result<()> {
        match self.child(parent, name) {
            Some(existing) => self.set_text(existing, value),
            None => {
                let node = self.build(name, &Content::Text(value.to_string()), depth)?;
                self.insert_child(parent, node, anchor, depth)
            }
        }
    }

    fn set_text(&mut self, node: Node, value: &str) -> Result<()> {
        let children: Vec<Node> = self.xot.children(node).collect();
        for child in children {
            self.xot.remove(child)?;
        }
        let text = self.xot.new_text(value);
        self.xot.append(node, text)?;
        Ok(())
    }

    fn remove_child(&mut self, parent: Node, name: NameId) -> Result<()> {
        if let Some(existing) = self.child(parent, name) {
            self.xot.remove(existing)?;
        }
        Ok(())
    }

    /// First `<project>` child that conventionally follows `name`.
    fn project_anchor(&self, name: NameId) -> Option<Node> {
        let position = self.project_order.iter().position(|&n| n == name)?;
        let later = &self.project_order[position + 1..];
        self.xot.children(self.project).find(|&child| {
            self.xot
                .element(child)
                .is_some_and(|element| later.contains(&element.name()))
        })
    }

    /// Insert `node` into `parent` before `anchor` (or last), keeping the
    /// surrounding indentation.
    fn insert_child(
        &mut self,
        parent: Node,
        node: Node,
        anchor: Option<Node>,
        depth: usize,
    ) -> Result<()> {
        let ws = self.newline(depth);

        if let Some(anchor) = anchor {
            // prev-ws NODE ws ANCHOR
            self.xot.insert_before(anchor, node)?;
            let ws = self.xot.new_text(&ws);
            self.xot.insert_before(anchor, ws)?;
            return Ok(());
        }

        let trailing = self.xot.last_child(parent).filter(|&last| {
            self.xot
                .text_str(last)
                .is_some_and(|text| text.trim().is_empty())
        });

        match trailing {
            Some(trailing) => {
                // last-element ws NODE trailing-ws
                self.xot.insert_before(trailing, node)?;
                let ws = self.xot.new_text(&ws);
                self.xot.insert_before(node, ws)?;
            }
            None => {
                let ws = self.xot.new_text(&ws);
                self.xot.append(parent, ws)?;
                self.xot.append(parent, node)?;
                let closing = self.newline(depth.saturating_sub(1));
                let closing = self.xot.new_text(&closing);
                self.xot.append(parent, closing)?;
            }
        }
        Ok(())
    }
}

/// Which namespace the `<project>` root lives in: `Some(None)` for no
/// namespace, `None` when the root is not a project element.
fn detect_namespace(xot: &mut Xot, root_name: NameId) -> Option<Option<NamespaceId>> {
    if xot.add_name("project") == root_name {
        return Some(None);
    }
    POM_NAMESPACES.iter().find_map(|uri| {
        let ns = xot.add_namespace(uri);
        (xot.add_name_ns("project", ns) == root_name).then_some(Some(ns))
    })
}

/// Source text ahead of the root start tag: the declaration, comments,
/// processing instructions, a doctype and the whitespace between them.
fn prolog(source: &str) -> &str {
    let mut rest = source;
    loop {
        let trimmed = rest.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
        let end = if trimmed.starts_with("<?") {
            trimmed.find("?>").map(|i| i + 2)
        } else if trimmed.starts_with("<!--") {
            trimmed.find("-->").map(|i| i + 3)
        } else if trimmed.starts_with("<!DOCTYPE") {
            doctype_end(trimmed)
        } else {
            None
        };
        match end {
            Some(end) => rest = &trimmed[end..],
            None => return &source[..source.len() - trimmed.len()],
        }
    }
}

fn doctype_end(doctype: &str) -> Option<usize> {
    let close = doctype.find('>')?;
    match doctype[..close].find('[') {
        Some(open) => {
            let subset_end = open + doctype[open..].find(']')?;
            doctype[subset_end..].find('>').map(|i| subset_end + i + 1)
        }
        None => Some(close + 1),
    }
}

/// Source text after the root end tag: trailing comments, processing
/// instructions and whitespace.
fn epilog(source: &str) -> &str {
    let mut rest = source;
    loop {
        let trimmed = rest.trim_end();
        let start = if trimmed.ends_with("-->") {
            trimmed.rfind("<!--")
        } else if trimmed.ends_with("?>") {
            trimmed.rfind("<?")
        } else {
            None
        };
        match start {
            Some(start) => rest = &trimmed[..start],
            None => return &source[trimmed.len()..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <version>1.0.0</version>
  <url>https://github.com/acme/widget</url>
  <dependencies>
    <!-- keep me -->
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

    const CURATED_POM: &str = r#"<project>
    <modelVersion>4.0.0</modelVersion>
    <url>https://github.com/acme/widget</url>
    <inceptionYear>2011</inceptionYear>
    <licenses>
        <license>
            <name>Apache-2.0</name>
            <distribution>manual</distribution>
        </license>
    </licenses>
    <developers>
        <developer>
            <id>jane</id>
            <name>Jane</name>
            <email>jane@example.com</email>
            <roles>
                <role>lead</role>
                <role>committer</role>
            </roles>
        </developer>
    </developers>
    <scm>
        <url>https://svn.acme.test/widget</url>
        <tag>HEAD</tag>
    </scm>
    <issueManagement>
        <system>jira</system>
        <url>https://jira.acme.test</url>
    </issueManagement>
</project>"#;

    fn filled_descriptor(base: &ProjectDescriptor) -> ProjectDescriptor {
        ProjectDescriptor {
            inception_year: Some("2020".to_string()),
            developers: vec![Developer {
                name: Some("Acme Corp".to_string()),
                email: None,
                url: Some("https://github.com/acme".to_string()),
                roles: vec!["maintainer".to_string()],
            }],
            issue_tracker: Some(IssueTracker {
                system: Some("github".to_string()),
                url: Some("https://github.com/acme/widget/issues".to_string()),
            }),
            licenses: vec![License {
                name: Some("MIT".to_string()),
                url: Some("https://opensource.org/MIT".to_string()),
                distribution: Some("repo".to_string()),
            }],
            scm: Some(Scm {
                url: Some("https://github.com/acme/widget".to_string()),
                connection: Some("scm:git:https://github.com/acme/widget.git".to_string()),
                developer_connection: Some("scm:git:git@github.com:acme/widget.git".to_string()),
            }),
            ..base.clone()
        }
    }

    #[test]
    fn test_parse_minimal_pom() {
        let pom = PomDocument::parse(MINIMAL_POM).unwrap();
        let descriptor = pom.descriptor();
        assert_eq!(
            descriptor.url.as_deref(),
            Some("https://github.com/acme/widget")
        );
        assert!(descriptor.inception_year.is_none());
        assert!(descriptor.developers.is_empty());
        assert!(descriptor.licenses.is_empty());
        assert!(descriptor.issue_tracker.is_none());
        assert!(descriptor.scm.is_none());
    }

    #[test]
    fn test_parse_curated_pom() {
        let pom = PomDocument::parse(CURATED_POM).unwrap();
        let descriptor = pom.descriptor();
        assert_eq!(descriptor.inception_year.as_deref(), Some("2011"));
        assert_eq!(descriptor.developers.len(), 1);
        assert_eq!(descriptor.developers[0].name.as_deref(), Some("Jane"));
        assert_eq!(descriptor.developers[0].roles, vec!["lead", "committer"]);
        assert_eq!(descriptor.licenses.len(), 1);
        assert_eq!(
            descriptor.licenses[0].distribution.as_deref(),
            Some("manual")
        );
        assert_eq!(
            descriptor.issue_tracker.as_ref().unwrap().system.as_deref(),
            Some("jira")
        );
        assert_eq!(
            descriptor.scm.as_ref().unwrap().url.as_deref(),
            Some("https://svn.acme.test/widget")
        );
    }

    #[test]
    fn test_parse_rejects_non_project_root() {
        let err = PomDocument::parse("<settings><url>x</url></settings>")
            .err()
            .unwrap();
        assert!(err.to_string().contains("<project>"));
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        assert!(PomDocument::parse("<project><url>").is_err());
    }

    #[test]
    fn test_update_fills_minimal_pom() {
        let mut pom = PomDocument::parse(MINIMAL_POM).unwrap();
        let filled = filled_descriptor(pom.descriptor());
        pom.update(&filled).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.ends_with("</project>\n"));
        assert!(xml.contains("<inceptionYear>2020</inceptionYear>"));
        assert!(xml.contains("<role>maintainer</role>"));
        assert!(xml.contains("<distribution>repo</distribution>"));
        assert!(xml.contains("<system>github</system>"));
        assert!(xml.contains(
            "<developerConnection>scm:git:git@github.com:acme/widget.git</developerConnection>"
        ));
        assert!(xml.contains("<!-- keep me -->"));
        assert!(!xml.contains("xmlns=\"\""));

        // New elements land before <dependencies>, in conventional order.
        let position = |needle: &str| xml.find(needle).unwrap();
        assert!(position("<url>https://github.com/acme/widget</url>") < position("<inceptionYear>"));
        assert!(position("<inceptionYear>") < position("<licenses>"));
        assert!(position("<licenses>") < position("<developers>"));
        assert!(position("<developers>") < position("<scm>"));
        assert!(position("<scm>") < position("<issueManagement>"));
        assert!(position("<issueManagement>") < position("<dependencies>"));

        // The rewritten document reads back as the filled descriptor.
        let reparsed = PomDocument::parse(&xml).unwrap();
        assert_eq!(reparsed.descriptor(), &filled);
    }

    #[test]
    fn test_update_indents_new_elements() {
        let mut pom = PomDocument::parse(MINIMAL_POM).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.inception_year = Some("2020".to_string());
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert!(xml.contains(
            "  <url>https://github.com/acme/widget</url>\n  <inceptionYear>2020</inceptionYear>\n  <dependencies>"
        ));
    }

    #[test]
    fn test_update_leaves_unchanged_fields_alone() {
        let mut pom = PomDocument::parse(CURATED_POM).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.scm = Some(Scm {
            url: Some("https://github.com/acme/widget".to_string()),
            connection: Some("scm:git:https://github.com/acme/widget.git".to_string()),
            developer_connection: Some("scm:git:git@github.com:acme/widget.git".to_string()),
        });
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        // Fields the model does not know about survive when untouched.
        assert!(xml.contains("<id>jane</id>"));
        assert!(xml.contains("<system>jira</system>"));
        assert!(xml.contains("<inceptionYear>2011</inceptionYear>"));
        // Replaced wholesale.
        assert!(!xml.contains("<tag>HEAD</tag>"));
        assert!(!xml.contains("svn.acme.test"));
        assert!(xml.contains("<connection>scm:git:https://github.com/acme/widget.git</connection>"));
    }

    #[test]
    fn test_update_overwrites_existing_issue_tracker_in_place() {
        let mut pom = PomDocument::parse(CURATED_POM).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.issue_tracker = Some(IssueTracker {
            system: Some("github".to_string()),
            url: Some("https://github.com/acme/widget/issues".to_string()),
        });
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert!(xml.contains(
            "<issueManagement>\n        <system>github</system>\n        <url>https://github.com/acme/widget/issues</url>\n    </issueManagement>"
        ));
    }

    #[test]
    fn test_update_without_changes_is_byte_identical() {
        let mut pom = PomDocument::parse(MINIMAL_POM).unwrap();
        let filled = filled_descriptor(pom.descriptor());
        pom.update(&filled).unwrap();
        let first = pom.to_xml_string().unwrap();

        let mut again = PomDocument::parse(&first).unwrap();
        let descriptor = again.descriptor().clone();
        again.update(&descriptor).unwrap();
        assert_eq!(again.to_xml_string().unwrap(), first);
    }

    #[test]
    fn test_update_never_writes_url() {
        let mut pom = PomDocument::parse(MINIMAL_POM).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.url = Some("https://github.com/other/thing".to_string());
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert!(xml.contains("<url>https://github.com/acme/widget</url>"));
        assert_eq!(
            pom.descriptor().url.as_deref(),
            Some("https://github.com/acme/widget")
        );
    }

    #[test]
    fn test_update_appends_when_no_later_sibling() {
        let mut pom = PomDocument::parse(
            "<project>\n  <url>https://github.com/acme/widget</url>\n</project>",
        )
        .unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.issue_tracker = Some(IssueTracker {
            system: Some("github".to_string()),
            url: Some("https://github.com/acme/widget/issues".to_string()),
        });
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<project>\n  <url>https://github.com/acme/widget</url>\n  <issueManagement>\n    <system>github</system>\n    <url>https://github.com/acme/widget/issues</url>\n  </issueManagement>\n</project>"
        );
    }

    #[test]
    fn test_prolog_and_epilog() {
        let source = "<?xml version=\"1.0\"?>\n<!-- header -->\n<!DOCTYPE project [<!ENTITY a \"b\">]>\n<project/>\n<!-- trailer -->\n";
        assert_eq!(
            prolog(source),
            "<?xml version=\"1.0\"?>\n<!-- header -->\n<!DOCTYPE project [<!ENTITY a \"b\">]>\n"
        );
        assert_eq!(epilog(source), "\n<!-- trailer -->\n");
        assert_eq!(prolog("<project/>"), "");
        assert_eq!(epilog("<project/>"), "");
    }

    #[test]
    fn test_update_keeps_header_comment_layout() {
        let source = "<?xml version=\"1.0\"?>\n<!-- license header -->\n<project>\n  <url>https://github.com/acme/widget</url>\n</project>\n<!-- trailer -->\n";
        let mut pom = PomDocument::parse(source).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.inception_year = Some("2020".to_string());
        pom.update(&descriptor).unwrap();

        assert_eq!(
            pom.to_xml_string().unwrap(),
            "<?xml version=\"1.0\"?>\n<!-- license header -->\n<project>\n  <url>https://github.com/acme/widget</url>\n  <inceptionYear>2020</inceptionYear>\n</project>\n<!-- trailer -->\n"
        );
    }

    #[test]
    fn test_update_keeps_crlf_line_endings() {
        let source = "<?xml version=\"1.0\"?>\r\n<project>\r\n  <url>https://github.com/acme/widget</url>\r\n  <dependencies/>\r\n</project>\r\n";
        let mut pom = PomDocument::parse(source).unwrap();
        let mut descriptor = pom.descriptor().clone();
        descriptor.inception_year = Some("2020".to_string());
        descriptor.issue_tracker = Some(IssueTracker {
            system: Some("github".to_string()),
            url: Some("https://github.com/acme/widget/issues".to_string()),
        });
        pom.update(&descriptor).unwrap();

        let xml = pom.to_xml_string().unwrap();
        assert!(!xml.replace("\r\n", "").contains('\n'));
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\r\n<project>\r\n"));
        assert!(xml.contains(
            "  <url>https://github.com/acme/widget</url>\r\n  <inceptionYear>2020</inceptionYear>\r\n"
        ));
        assert!(xml.contains("  <issueManagement>\r\n    <system>github</system>\r\n"));
        assert!(xml.ends_with("</project>\r\n"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = PomDocument::load(&temp.path().join("pom.xml")).err().unwrap();
        assert!(err.is_not_found());
        assert!(!temp.path().join("pom.xml").exists());
    }

    #[test]
    fn test_load_malformed_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pom.xml");
        fs::write(&path, "<project><url>").unwrap();

        let err = PomDocument::load(&path).err().unwrap();
        assert!(matches!(err, Error::DescriptorRead { .. }));
        assert!(err.to_string().contains("while reading"));
    }

    #[test]
    fn test_save_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pom.xml");
        fs::write(&path, MINIMAL_POM).unwrap();

        let mut pom = PomDocument::load(&path).unwrap();
        let filled = filled_descriptor(pom.descriptor());
        pom.update(&filled).unwrap();
        pom.save(&path).unwrap();

        let reloaded = PomDocument::load(&path).unwrap();
        assert_eq!(reloaded.descriptor(), &filled);
    }
}
