//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "packout",
    bin_name = "packout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render job packs to the terminal or to disk",
    long_about = "packout renders the templates of a pack and its dependencies, \
                  shows them on the terminal and optionally writes them under \
                  an output directory.",
    after_help = "EXAMPLES:\n\
        \x20 packout render ./my-pack\n\
        \x20 packout render redis --registry community --ref v2 -o ./out\n\
        \x20 packout render ./my-pack --render-output-template --var region=eu\n\
        \x20 packout completions bash > /usr/share/bash-completion/completions/packout",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a pack.
    #[command(
        about = "Render a pack",
        after_help = "EXAMPLES:\n\
            \x20 packout render .\n\
            \x20 packout render example -o ./rendered\n\
            \x20 packout render example --var-file vars.toml --var count=3"
    )]
    Render(RenderArgs),

    /// Manage the local pack cache.
    #[command(
        about = "Manage the local pack registry cache",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 packout registry add ./my-pack\n\
            \x20 packout registry add ./my-pack --registry team --ref v1"
    )]
    Registry(RegistryCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 packout completions bash > ~/.local/share/bash-completion/completions/packout\n\
            \x20 packout completions zsh  > ~/.zfunc/_packout\n\
            \x20 packout completions fish > ~/.config/fish/completions/packout.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the packout configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 packout config get render.auto_approve\n\
            \x20 packout config list\n\
            \x20 packout config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `packout render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Registry pack name, or a path to a pack directory.
    #[arg(value_name = "PACK", help = "Pack name or path to a pack directory")]
    pub pack: String,

    /// Registry to look the pack up in.
    #[arg(long = "registry", value_name = "NAME", help = "Registry to use")]
    pub registry: Option<String>,

    /// Pack version; not allowed with a path.
    #[arg(long = "ref", value_name = "REF", help = "Pack ref (default: latest)")]
    pub git_ref: Option<String>,

    /// Also render the pack's outputs.tpl.
    #[arg(
        long = "render-output-template",
        help = "Render the output template as well"
    )]
    pub render_output_template: bool,

    /// Write renders below this directory as well as to the terminal.
    #[arg(
        short = 'o',
        long = "to-dir",
        value_name = "DIR",
        help = "Also write rendered files under DIR"
    )]
    pub to_dir: Option<PathBuf>,

    /// Template variables as `key=value`; repeatable.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        help = "Set a template variable (repeatable)"
    )]
    pub vars: Vec<String>,

    /// TOML file of template variables; `--var` wins on conflict.
    #[arg(
        long = "var-file",
        value_name = "FILE",
        help = "Load template variables from a TOML file"
    )]
    pub var_file: Option<PathBuf>,
}

// ── registry ──────────────────────────────────────────────────────────────────

/// Subcommands for `packout registry`.
#[derive(Debug, Subcommand)]
pub enum RegistryCommands {
    /// Copy a local pack directory into the registry cache.
    Add(RegistryAddArgs),
}

/// Arguments for `packout registry add`.
#[derive(Debug, Args)]
pub struct RegistryAddArgs {
    /// Pack directory to copy.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Name to store the pack under (default: directory name).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Registry to add the pack to.
    #[arg(long = "registry", value_name = "NAME")]
    pub registry: Option<String>,

    /// Ref to store the pack as.
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `packout completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `packout config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `render.auto_approve`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
