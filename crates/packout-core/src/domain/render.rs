//! Rendered templates and the ordered batch built from them.

use std::collections::BTreeMap;

use super::DomainError;
use super::name::{NameStyle, format_render_name};

/// Name given to the output-template render. It is not canonicalised.
pub const OUTPUT_TEMPLATE_NAME: &str = "outputs.tpl";

/// Which part of a pack a render came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderGroup {
    Dependent,
    Parent,
    OutputTemplate,
}

/// A single rendered template ready for display or materialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    /// Output-relative name, already canonicalised.
    pub name: String,
    pub content: String,
    pub group: RenderGroup,
}

impl Render {
    pub fn new(name: impl Into<String>, content: impl Into<String>, group: RenderGroup) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            group,
        }
    }
}

/// What a template engine produced for one pack.
///
/// Both groupings are keyed by raw template name and held sorted, so output
/// order never depends on how the engine iterated its templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    parent: BTreeMap<String, String>,
    dependent: BTreeMap<String, String>,
}

impl RenderOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary (possibly unordered) name/content pairs.
    pub fn from_renders<P, D>(parent: P, dependent: D) -> Self
    where
        P: IntoIterator<Item = (String, String)>,
        D: IntoIterator<Item = (String, String)>,
    {
        Self {
            parent: parent.into_iter().collect(),
            dependent: dependent.into_iter().collect(),
        }
    }

    pub fn add_parent(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.parent.insert(name.into(), content.into());
    }

    pub fn add_dependent(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.dependent.insert(name.into(), content.into());
    }

    pub fn parent_renders(&self) -> &BTreeMap<String, String> {
        &self.parent
    }

    pub fn dependent_renders(&self) -> &BTreeMap<String, String> {
        &self.dependent
    }

    pub fn len_parent_renders(&self) -> usize {
        self.parent.len()
    }

    pub fn len_dependent_renders(&self) -> usize {
        self.dependent.len()
    }
}

/// Renders in the exact order they are written and displayed.
///
/// Order: dependent renders by raw name, then parent renders by raw name,
/// then the output-template render if one was added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBatch {
    renders: Vec<Render>,
}

impl OutputBatch {
    /// Assemble a batch from engine output.
    ///
    /// Fails with [`DomainError::NoTemplatesRendered`] when both groupings
    /// are empty; an output template alone is not a meaningful render.
    pub fn assemble(output: &RenderOutput, style: NameStyle) -> Result<Self, DomainError> {
        if output.len_parent_renders() == 0 && output.len_dependent_renders() == 0 {
            return Err(DomainError::NoTemplatesRendered);
        }

        let dependent = output
            .dependent_renders()
            .iter()
            .map(|(name, content)| {
                Render::new(
                    format_render_name(name, style),
                    content.clone(),
                    RenderGroup::Dependent,
                )
            });
        let parent = output.parent_renders().iter().map(|(name, content)| {
            Render::new(
                format_render_name(name, style),
                content.clone(),
                RenderGroup::Parent,
            )
        });

        Ok(Self {
            renders: dependent.chain(parent).collect(),
        })
    }

    /// Append the output-template render. Always lands last.
    pub fn push_output_template(&mut self, content: impl Into<String>) {
        self.renders.push(Render::new(
            OUTPUT_TEMPLATE_NAME,
            content,
            RenderGroup::OutputTemplate,
        ));
    }

    pub fn renders(&self) -> &[Render] {
        &self.renders
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Render> {
        self.renders.iter()
    }
}

impl<'a> IntoIterator for &'a OutputBatch {
    type Item = &'a Render;
    type IntoIter = std::slice::Iter<'a, Render>;

    fn into_iter(self) -> Self::IntoIter {
        self.renders.iter()
    }
}
