//! Simple variable substitution renderer.

use packout_core::{
    application::{ApplicationError, ports::PackRenderer},
    domain::{Pack, RenderContext, RenderOutput},
    error::PackoutResult,
};
use tracing::{debug, instrument};

/// Renderer using `{{ name }}` substitution from a [`RenderContext`].
///
/// Parent templates are named `<pack>/templates/<file>`. A dependency's
/// templates are named `<pack>/<dep>/templates/<file>`, nesting one segment
/// per level for dependencies of dependencies.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PackRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(pack = %pack.name))]
    fn render(&self, pack: &Pack, context: &RenderContext) -> PackoutResult<RenderOutput> {
        let mut output = RenderOutput::new();

        for template in &pack.templates {
            output.add_parent(
                format!("{}/templates/{}", pack.name, template.file_name),
                context.render(&template.source),
            );
        }

        for dependency in &pack.dependencies {
            render_dependency(dependency, &pack.name, context, &mut output);
        }

        debug!(
            parent = output.len_parent_renders(),
            dependent = output.len_dependent_renders(),
            "pack rendered"
        );
        Ok(output)
    }

    fn render_output_template(
        &self,
        pack: &Pack,
        context: &RenderContext,
    ) -> PackoutResult<String> {
        let source = pack.output_template.as_deref().ok_or_else(|| {
            ApplicationError::RenderingFailed {
                reason: format!("pack '{}' has no output template", pack.name),
            }
        })?;
        Ok(context.render(source))
    }
}

fn render_dependency(
    dependency: &Pack,
    parent_prefix: &str,
    context: &RenderContext,
    output: &mut RenderOutput,
) {
    let prefix = format!("{parent_prefix}/{}", dependency.name);
    for template in &dependency.templates {
        output.add_dependent(
            format!("{prefix}/templates/{}", template.file_name),
            context.render(&template.source),
        );
    }
    for nested in &dependency.dependencies {
        render_dependency(nested, &prefix, context, output);
    }
}
