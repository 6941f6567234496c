//! Sends each render of a batch to disk (optionally) and to the terminal.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::application::RenderError;
use crate::application::ports::{Filesystem, LineSource, Presenter};
use crate::application::services::materializer::FileMaterializer;
use crate::domain::{ErrorContext, OutputBatch, Session};

/// Message shown ahead of every per-file failure.
pub const FILE_ERROR_MESSAGE: &str = "error rendering to file";

/// What happened to a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Renders shown on the terminal.
    pub presented: usize,
    /// Files created or overwritten.
    pub written: Vec<PathBuf>,
    /// Existing files left alone because the overwrite was declined.
    pub skipped: Vec<PathBuf>,
    /// Renders whose file write failed for any other reason.
    pub failed: usize,
}

/// Orchestrates materialisation and presentation for a batch.
pub struct OutputDispatcher<'a> {
    materializer: FileMaterializer<'a>,
    presenter: &'a mut dyn Presenter,
}

impl<'a> OutputDispatcher<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        input: &'a mut dyn LineSource,
        presenter: &'a mut dyn Presenter,
    ) -> Self {
        Self {
            materializer: FileMaterializer::new(filesystem, input),
            presenter,
        }
    }

    /// Dispatch every render in batch order.
    ///
    /// For each render the file (when `to_dir` is set) is written before the
    /// render is shown, so what is on screen is already on disk. Per-file
    /// failures are reported with `context` plus the error's own context and
    /// do not stop the batch or suppress display. Cancellation and terminal
    /// write failures abort immediately.
    #[instrument(skip_all, fields(renders = batch.len(), to_dir = ?to_dir))]
    pub fn dispatch(
        &mut self,
        batch: &OutputBatch,
        to_dir: Option<&Path>,
        session: &mut Session,
        interactive: bool,
        context: &ErrorContext,
    ) -> Result<DispatchReport, RenderError> {
        let mut report = DispatchReport::default();

        for render in batch {
            if let Some(dir) = to_dir {
                match self.materializer.write(render, dir, session, interactive) {
                    Ok(path) => report.written.push(path),
                    Err(err) if err.is_fatal() => {
                        warn!(render = %render.name, error = %err, "aborting dispatch");
                        return Err(err);
                    }
                    Err(err) => {
                        debug!(render = %render.name, kind = ?err.kind(), "file output failed");
                        let full_context = match err.context() {
                            Some(own) => context.merged(own),
                            None => context.clone(),
                        };
                        self.presenter
                            .report(FILE_ERROR_MESSAGE, &err, &full_context)
                            .map_err(|source| RenderError::Presentation { source })?;

                        match err {
                            RenderError::AlreadyExists { path, .. } => report.skipped.push(path),
                            _ => report.failed += 1,
                        }
                    }
                }
            }

            self.presenter
                .present(render)
                .map_err(|source| RenderError::Presentation { source })?;
            report.presented += 1;
        }

        Ok(report)
    }
}

impl DispatchReport {
    /// Whether any file was skipped or failed.
    pub fn has_file_errors(&self) -> bool {
        !self.skipped.is_empty() || self.failed > 0
    }
}
