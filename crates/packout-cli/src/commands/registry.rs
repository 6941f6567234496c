//! `packout registry`: populate the local pack cache.

use tracing::{info, instrument};

use packout_adapters::{LocalPackSource, copy_dir};
use packout_core::domain::PackRequest;

use crate::{
    cli::{RegistryAddArgs, RegistryCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct registry subcommand.
pub fn execute(cmd: RegistryCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        RegistryCommands::Add(args) => add(args, &config, &output),
    }
}

/// Copy a pack directory to `<cache>/<registry>/<name>@<ref>`.
#[instrument(skip_all, fields(path = %args.path.display()))]
fn add(args: RegistryAddArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let name = match args.name {
        Some(name) => name,
        None => pack_name_from_path(&args.path)?,
    };

    let request =
        PackRequest::new(name, args.registry, args.git_ref).map_err(|e| CliError::Core(e.into()))?;
    if request.is_path() {
        return Err(CliError::InvalidInput {
            message: format!("pack name '{}' must not contain a path", request.name),
            source: None,
        });
    }

    let source = LocalPackSource::new(config.cache_dir())
        .with_default_registry(config.registry.default_registry.clone());
    let destination = source.registry_dir(&request);

    copy_dir(&args.path, &destination)?;

    info!(destination = %destination.display(), "Pack cached");
    output.success(&format!("Added {request} at {}", destination.display()))?;
    Ok(())
}

fn pack_name_from_path(path: &std::path::Path) -> CliResult<String> {
    std::fs::canonicalize(path)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .ok_or_else(|| CliError::InvalidInput {
            message: format!("cannot derive a pack name from '{}'", path.display()),
            source: None,
        })
}
