//! Filesystem-based pack loader.
//!
//! # Directory layout expected
//!
//! ```text
//! example/
//! ├── metadata.toml          ← optional manifest
//! ├── outputs.tpl            ← optional output template
//! ├── templates/
//! │   ├── web.nomad.tpl      ← parent template
//! │   └── _helpers.tpl       ← helper, not rendered on its own
//! └── deps/
//!     └── redis/             ← dependency pack, same layout
//!         └── templates/
//!             └── redis.nomad.tpl
//! ```
//!
//! # `metadata.toml` format
//!
//! ```toml
//! [pack]
//! name        = "example"    # defaults to the directory name
//! description = "Example web service"
//! version     = "0.1.0"
//! ```
//!
//! Registry packs live under
//! `<cache_dir>/<registry>/<name>@<ref>`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use packout_core::{
    application::{ApplicationError, ports::PackSource},
    domain::{DomainError, OUTPUT_TEMPLATE_NAME, Pack, PackRequest, TEMPLATE_SUFFIX},
    error::PackoutResult,
};

/// Registry used when neither the request nor the config names one.
pub const DEFAULT_REGISTRY: &str = "default";

const MANIFEST_FILE: &str = "metadata.toml";
const TEMPLATES_DIR: &str = "templates";
const DEPS_DIR: &str = "deps";

/// Deserialised `metadata.toml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PackManifest {
    #[serde(default)]
    pub pack: PackSection,
}

/// `[pack]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PackSection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Loads packs from a directory or from the local registry cache.
#[derive(Debug, Clone)]
pub struct LocalPackSource {
    cache_dir: PathBuf,
    default_registry: String,
}

impl LocalPackSource {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            default_registry: DEFAULT_REGISTRY.to_string(),
        }
    }

    pub fn with_default_registry(mut self, registry: impl Into<String>) -> Self {
        self.default_registry = registry.into();
        self
    }

    /// Where `request` would be found, without checking that it exists.
    pub fn resolve(&self, request: &PackRequest) -> PackoutResult<PathBuf> {
        let as_path = Path::new(&request.name);
        if request.is_path() || as_path.is_dir() {
            if request.git_ref.is_some() {
                return Err(DomainError::InvalidPackRequest(
                    "cannot specify a ref when rendering a pack from a path".into(),
                )
                .into());
            }
            return Ok(as_path.to_path_buf());
        }

        Ok(self.registry_dir(request))
    }

    /// `<cache>/<registry>/<name>@<ref>`, ignoring any local directory of
    /// the same name.
    pub fn registry_dir(&self, request: &PackRequest) -> PathBuf {
        let registry = request
            .registry
            .as_deref()
            .unwrap_or(&self.default_registry);
        self.cache_dir
            .join(registry)
            .join(format!("{}@{}", request.name, request.resolved_ref()))
    }
}

impl PackSource for LocalPackSource {
    #[instrument(skip_all, fields(pack = %request))]
    fn load(&self, request: &PackRequest) -> PackoutResult<Pack> {
        let dir = self.resolve(request)?;
        if !dir.is_dir() {
            return Err(ApplicationError::PackNotFound {
                name: request.name.clone(),
                searched: dir,
            }
            .into());
        }

        // Cached directories carry an `@ref` suffix; name those packs after
        // the request unless their manifest says otherwise.
        let fallback = (!request.is_path() && !Path::new(&request.name).is_dir())
            .then_some(request.name.as_str());
        Ok(load_pack_dir(&dir, fallback)?)
    }
}

/// Load one pack directory and, recursively, its `deps/`.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub(crate) fn load_pack_dir(
    dir: &Path,
    fallback_name: Option<&str>,
) -> Result<Pack, ApplicationError> {
    let manifest = read_manifest(dir)?;
    let name = manifest
        .pack
        .name
        .clone()
        .or_else(|| fallback_name.map(str::to_owned))
        .or_else(|| {
            fs::canonicalize(dir)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .ok_or_else(|| load_failed(dir, "cannot determine pack name".into()))?;

    let mut pack = Pack::new(name, dir);

    let templates_dir = dir.join(TEMPLATES_DIR);
    if templates_dir.is_dir() {
        for (file_name, source) in read_templates(&templates_dir)? {
            pack = pack.with_template(file_name, source);
        }
    }

    let output_template = dir.join(OUTPUT_TEMPLATE_NAME);
    if output_template.is_file() {
        let source = fs::read_to_string(&output_template)
            .map_err(|e| load_failed(&output_template, e.to_string()))?;
        pack = pack.with_output_template(source);
    }

    let deps_dir = dir.join(DEPS_DIR);
    if deps_dir.is_dir() {
        let mut dep_dirs: Vec<PathBuf> = fs::read_dir(&deps_dir)
            .map_err(|e| load_failed(&deps_dir, e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir())
            .collect();
        dep_dirs.sort();

        for dep_dir in dep_dirs {
            pack = pack.with_dependency(load_pack_dir(&dep_dir, None)?);
        }
    }

    debug!(
        pack = %pack.name,
        version = manifest.pack.version.as_deref().unwrap_or("-"),
        description = manifest.pack.description.as_deref().unwrap_or(""),
        templates = pack.templates.len(),
        dependencies = pack.dependencies.len(),
        "loaded pack"
    );
    Ok(pack)
}

fn read_manifest(dir: &Path) -> Result<PackManifest, ApplicationError> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(PackManifest::default());
    }

    let raw = fs::read_to_string(&path).map_err(|e| load_failed(&path, e.to_string()))?;
    toml::from_str(&raw).map_err(|e| load_failed(&path, format!("invalid {MANIFEST_FILE}: {e}")))
}

/// Every `*.tpl` under `templates_dir`, keyed by `/`-separated relative path.
///
/// Files whose name starts with `_` are helpers and are skipped.
fn read_templates(templates_dir: &Path) -> Result<Vec<(String, String)>, ApplicationError> {
    let mut templates = Vec::new();

    for entry in WalkDir::new(templates_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| load_failed(templates_dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(TEMPLATE_SUFFIX) {
            continue;
        }
        if file_name.starts_with('_') {
            debug!(file = %file_name, "skipping helper template");
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(templates_dir)
            .map_err(|e| load_failed(entry.path(), e.to_string()))?;
        let key = normalize_path(&relative.to_string_lossy());

        match fs::read_to_string(entry.path()) {
            Ok(source) => templates.push((key, source)),
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "unreadable template");
                return Err(load_failed(entry.path(), e.to_string()));
            }
        }
    }

    Ok(templates)
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn load_failed(path: &Path, reason: String) -> ApplicationError {
    ApplicationError::PackLoadFailed {
        path: path.to_path_buf(),
        reason,
    }
}
