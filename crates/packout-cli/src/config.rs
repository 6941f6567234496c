//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `PACKOUT__<SECTION>__<KEY>`
//! 3. Config file (`--config`, or [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use packout_adapters::pack_source::DEFAULT_REGISTRY;
use packout_core::domain::NameStyle;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "PACKOUT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Render behaviour.
    pub render: RenderConfig,
    /// Where registry packs are cached.
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Strip any trailing `.`, `t`, `p`, `l` characters from render names
    /// instead of just the `.tpl` suffix.
    pub legacy_name_trim: bool,
    /// Start every run with overwrites pre-approved.
    pub auto_approve: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Cache root; defaults to the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    pub default_registry: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            default_registry: DEFAULT_REGISTRY.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn name_style(&self) -> NameStyle {
        if self.legacy_name_trim {
            NameStyle::Legacy
        } else {
            NameStyle::TrimSuffix
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// A file passed via `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode default config")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.packout.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "packout", "packout")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".packout.toml"))
    }

    /// Root of the registry cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.registry.cache_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("io", "packout", "packout")
                .map(|d| d.cache_dir().join("packs"))
                .unwrap_or_else(|| PathBuf::from(".packout/packs"))
        })
    }
}
