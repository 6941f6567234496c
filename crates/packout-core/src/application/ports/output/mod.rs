//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `packout-adapters` crate provides implementations; the CLI provides
//! the terminal [`Presenter`].

use std::io;
use std::path::Path;

use crate::domain::{ErrorContext, Pack, PackRequest, Render, RenderContext, RenderOutput};
use crate::error::PackoutResult;

/// Port for filesystem operations used while materialising renders.
///
/// Implemented by:
/// - `packout_adapters::filesystem::LocalFilesystem` (production)
///
/// Errors are plain `io::Error`s; the caller attaches the path and context.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate `path` and write `content` to it.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for reading one line of user input.
///
/// Implemented by:
/// - `packout_adapters::prompt::ReaderLineSource`
/// - `packout_adapters::prompt::DialoguerLineSource` (`interactive` feature)
pub trait LineSource {
    /// Show `prompt` and block until a line is read.
    ///
    /// Any error, including end of input or an interrupt, is treated by the
    /// caller as the user cancelling.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Port for the interactive display and the diagnostic surface.
pub trait Presenter {
    /// Show one render (name, blank line, content).
    fn present(&mut self, render: &Render) -> io::Result<()>;

    /// Report an error with its ordered context.
    fn report(
        &mut self,
        message: &str,
        error: &dyn std::error::Error,
        context: &ErrorContext,
    ) -> io::Result<()>;
}

/// Port for locating and loading packs.
///
/// Implemented by:
/// - `packout_adapters::pack_source::LocalPackSource`
pub trait PackSource {
    fn load(&self, request: &PackRequest) -> PackoutResult<Pack>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `packout_adapters::renderer::SimpleRenderer` (variable substitution)
pub trait PackRenderer {
    /// Render a pack's parent and dependent templates.
    fn render(&self, pack: &Pack, context: &RenderContext) -> PackoutResult<RenderOutput>;

    /// Render the pack's output template.
    fn render_output_template(&self, pack: &Pack, context: &RenderContext)
    -> PackoutResult<String>;
}
