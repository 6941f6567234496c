//! Ordered diagnostic context attached to reported errors.

use std::fmt;

/// Label for the file a render was being written to.
pub const CONTEXT_DEST_FILE: &str = "Destination File";
/// Label for the directory a render was being written to.
pub const CONTEXT_DEST_DIR: &str = "Destination Dir";
/// Label for the pack name or path given on the command line.
pub const CONTEXT_PACK_NAME: &str = "Pack Name";
/// Label for the resolved on-disk pack location.
pub const CONTEXT_PACK_PATH: &str = "Pack Path";
/// Label for the registry a pack was looked up in.
pub const CONTEXT_REGISTRY_NAME: &str = "Registry Name";
/// Label for the requested pack ref.
pub const CONTEXT_PACK_REF: &str = "Pack Ref";

/// Ordered label/value pairs shown alongside an error.
///
/// Purely additive: entries are appended in the order they are learned and
/// never influence control flow. Duplicate labels are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    entries: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    /// Builder form of [`Self::add`].
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(label, value);
        self
    }

    /// Append every entry of `other`, keeping its order.
    pub fn extend(&mut self, other: &ErrorContext) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// A new context holding `self` followed by `other`.
    pub fn merged(&self, other: &ErrorContext) -> ErrorContext {
        let mut out = self.clone();
        out.extend(other);
        out
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Value of the first entry with `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
