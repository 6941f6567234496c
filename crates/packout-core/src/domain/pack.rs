//! Packs, pack requests, and the variable context used to render them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::DomainError;

/// Ref used when none is requested.
pub const DEFAULT_REF: &str = "latest";

/// What the user asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRequest {
    /// Pack name, or a filesystem path to a pack directory.
    pub name: String,
    pub registry: Option<String>,
    pub git_ref: Option<String>,
}

impl PackRequest {
    /// Build a request, normalising empty flag values to `None`.
    pub fn new(
        name: impl Into<String>,
        registry: Option<String>,
        git_ref: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidPackRequest(
                "pack name cannot be empty".into(),
            ));
        }

        let request = Self {
            name,
            registry: registry.filter(|r| !r.is_empty()),
            git_ref: git_ref.filter(|r| !r.is_empty()),
        };

        if request.is_path() && request.git_ref.is_some() {
            return Err(DomainError::InvalidPackRequest(
                "cannot specify a ref when rendering a pack from a path".into(),
            ));
        }

        Ok(request)
    }

    /// Whether the name should be read as a filesystem path.
    ///
    /// Relative (`.`, `./x`, `../x`) and absolute names are paths; anything
    /// else is a registry pack name.
    pub fn is_path(&self) -> bool {
        let name = self.name.as_str();
        name.starts_with('.') || Path::new(name).is_absolute() || name.contains(['/', '\\'])
    }

    /// The ref to resolve, falling back to [`DEFAULT_REF`].
    pub fn resolved_ref(&self) -> &str {
        self.git_ref.as_deref().unwrap_or(DEFAULT_REF)
    }
}

impl fmt::Display for PackRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_path() {
            return write!(f, "{}", self.name);
        }
        match &self.registry {
            Some(registry) => write!(f, "{registry}/{}@{}", self.name, self.resolved_ref()),
            None => write!(f, "{}@{}", self.name, self.resolved_ref()),
        }
    }
}

/// One template file inside a pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackTemplate {
    /// Path relative to the pack's `templates/` directory, `/`-separated.
    pub file_name: String,
    pub source: String,
}

/// A loaded pack with its dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    pub name: String,
    pub path: PathBuf,
    pub templates: Vec<PackTemplate>,
    pub output_template: Option<String>,
    pub dependencies: Vec<Pack>,
}

impl Pack {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            templates: Vec::new(),
            output_template: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_template(mut self, file_name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.push(PackTemplate {
            file_name: file_name.into(),
            source: source.into(),
        });
        self
    }

    pub fn with_output_template(mut self, source: impl Into<String>) -> Self {
        self.output_template = Some(source.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Pack) -> Self {
        self.dependencies.push(dependency);
        self
    }
}

/// Variables available to templates as `{{ name }}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a `key=value` assignment as given to `--var`.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<(), DomainError> {
        let (key, value) =
            assignment
                .split_once('=')
                .ok_or_else(|| DomainError::InvalidVariable {
                    key: assignment.to_string(),
                    reason: "expected key=value".into(),
                })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidVariable {
                key: assignment.to_string(),
                reason: "variable name cannot be empty".into(),
            });
        }

        self.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Replace `{{ key }}` placeholders (inner whitespace optional).
    ///
    /// - `{{ unknown }}` stays as written
    /// - an unterminated `{{` is copied through
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = after[..end].trim();
            match self.variables.get(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}
