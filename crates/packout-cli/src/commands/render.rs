//! Implementation of the `packout render` command.
//!
//! Responsibility: translate CLI arguments into a `RenderRequest`, wire the
//! adapters into the core render service, and summarise the result. No
//! business logic lives here.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use tracing::{debug, info, instrument};

use packout_adapters::{LocalFilesystem, LocalPackSource, SimpleRenderer};
use packout_core::{
    application::{LineSource, RenderRequest, RenderService},
    domain::{PackRequest, RenderContext, Session},
};

use crate::{
    cli::{RenderArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `packout render` command.
///
/// Dispatch sequence:
/// 1. Build the pack request (rejects `--ref` with a path)
/// 2. Collect template variables from `--var-file` then `--var`
/// 3. Seed the session from `--auto-approve` or config
/// 4. Run the render service against the real filesystem and terminal
/// 5. Summarise file results on stderr
#[instrument(skip_all, fields(pack = %args.pack))]
pub fn execute(
    args: RenderArgs,
    global: GlobalArgs,
    config: AppConfig,
    mut output: OutputManager,
) -> CliResult<()> {
    // 1. Pack request
    let pack = PackRequest::new(&args.pack, args.registry.clone(), args.git_ref.clone())
        .map_err(|e| CliError::Core(e.into()))?;

    // 2. Variables
    let variables = collect_variables(args.var_file.as_deref(), &args.vars)?;
    debug!(count = variables.len(), "Template variables collected");

    // 3. Session and request
    let mut session = Session::with_auto_approve(global.auto_approve || config.render.auto_approve);
    let interactive = io::stdin().is_terminal();

    let mut request = RenderRequest::new(pack);
    request.to_dir = args.to_dir.clone();
    request.render_output_template = args.render_output_template;
    request.variables = variables;
    request.name_style = config.render.name_style();
    request.interactive = interactive;

    // 4. Render
    let service = RenderService::new(
        Box::new(
            LocalPackSource::new(config.cache_dir())
                .with_default_registry(config.registry.default_registry.clone()),
        ),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    let mut input = line_source(interactive);
    let report = service.render(&request, &mut session, input.as_mut(), &mut output)?;

    info!(
        presented = report.presented,
        written = report.written.len(),
        "Render finished"
    );

    // 5. Summary
    if let Some(dir) = &args.to_dir {
        if !report.written.is_empty() {
            output.success(&format!(
                "Wrote {} file(s) under {}",
                report.written.len(),
                dir.display()
            ))?;
        }
        if report.has_file_errors() {
            output.warning(&format!(
                "{} file(s) not written",
                report.skipped.len() + report.failed
            ))?;
        }
    }

    Ok(())
}

/// Variables from the optional TOML file, overlaid by `--var` assignments.
fn collect_variables(var_file: Option<&Path>, assignments: &[String]) -> CliResult<RenderContext> {
    let mut context = RenderContext::new();

    if let Some(path) = var_file {
        let raw = fs::read_to_string(path)
            .with_cli_context(|| format!("failed to read var file {}", path.display()))?;
        for (key, value) in parse_var_file(&raw)
            .with_cli_context(|| format!("invalid var file {}", path.display()))?
        {
            context.insert(key, value);
        }
    }

    for assignment in assignments {
        context
            .insert_assignment(assignment)
            .map_err(|e| CliError::Core(e.into()))?;
    }

    Ok(context)
}

/// Top-level keys of a TOML table; non-string scalars are stringified.
fn parse_var_file(raw: &str) -> Result<BTreeMap<String, String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(raw)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

#[cfg(feature = "interactive")]
fn line_source(interactive: bool) -> Box<dyn LineSource> {
    if interactive {
        Box::new(packout_adapters::DialoguerLineSource::new())
    } else {
        Box::new(packout_adapters::ReaderLineSource::stdin())
    }
}

#[cfg(not(feature = "interactive"))]
fn line_source(_interactive: bool) -> Box<dyn LineSource> {
    Box::new(packout_adapters::ReaderLineSource::stdin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn var_file_values_are_stringified() {
        let vars = parse_var_file("region = \"eu\"\ncount = 3\nenabled = true\n").unwrap();
        assert_eq!(vars["region"], "eu");
        assert_eq!(vars["count"], "3");
        assert_eq!(vars["enabled"], "true");
    }

    #[test]
    fn invalid_var_file_is_error() {
        assert!(parse_var_file("region = ").is_err());
    }

    #[test]
    fn cli_vars_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vars.toml");
        fs::write(&path, "region = \"eu\"\nimage = \"redis\"\n").unwrap();

        let ctx = collect_variables(Some(&path), &["region=us".to_string()]).unwrap();
        assert_eq!(ctx.get("region"), Some("us"));
        assert_eq!(ctx.get("image"), Some("redis"));
    }

    #[test]
    fn malformed_assignment_is_invalid_input() {
        let err = collect_variables(None, &["novalue".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn missing_var_file_is_io_error() {
        let err = collect_variables(Some(Path::new("/no/such/vars.toml")), &[]).unwrap_err();
        assert!(matches!(err, CliError::IoError { .. }));
    }
}
