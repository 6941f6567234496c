//! Writes renders under an output directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{info, instrument};

use crate::application::RenderError;
use crate::application::ports::{Filesystem, LineSource};
use crate::application::services::confirmation::ConfirmationGate;
use crate::domain::{CONTEXT_DEST_DIR, CONTEXT_DEST_FILE, ErrorContext, Render, Session};

/// Resolves destinations for renders and writes them through the gate.
pub struct FileMaterializer<'a> {
    filesystem: &'a dyn Filesystem,
    gate: ConfirmationGate<'a>,
}

impl<'a> FileMaterializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, input: &'a mut dyn LineSource) -> Self {
        Self {
            filesystem,
            gate: ConfirmationGate::new(filesystem, input),
        }
    }

    /// Write `render` below `to_dir` and return the file written.
    ///
    /// The render name is split at its last `/`; the directory part is
    /// created under `to_dir` (with any missing parents) before the gate is
    /// consulted. A declined overwrite yields [`RenderError::AlreadyExists`];
    /// a cancelled prompt is passed through untouched.
    #[instrument(skip_all, fields(render = %render.name))]
    pub fn write(
        &mut self,
        render: &Render,
        to_dir: &Path,
        session: &mut Session,
        interactive: bool,
    ) -> Result<PathBuf, RenderError> {
        let (dir_part, file_name) = split_render_name(&render.name)?;
        let out_dir = join_relative(to_dir, dir_part, &render.name)?;

        self.filesystem
            .create_dir_all(&out_dir)
            .map_err(|source| RenderError::Io {
                context: ErrorContext::new().with(CONTEXT_DEST_DIR, out_dir.display().to_string()),
                path: out_dir.clone(),
                source,
            })?;

        let out_file = out_dir.join(file_name);
        let dest_context =
            || ErrorContext::new().with(CONTEXT_DEST_FILE, out_file.display().to_string());

        if self.filesystem.is_dir(&out_file) {
            return Err(RenderError::Io {
                path: out_file.clone(),
                source: io::Error::from(io::ErrorKind::IsADirectory),
                context: dest_context(),
            });
        }

        let decision = self.gate.confirm(&out_file, session, interactive)?;
        if !decision.allows_write() {
            return Err(RenderError::AlreadyExists {
                path: out_file.clone(),
                context: dest_context(),
            });
        }

        self.filesystem
            .write_file(&out_file, &render.content)
            .map_err(|source| RenderError::Io {
                path: out_file.clone(),
                source,
                context: dest_context(),
            })?;

        info!(path = %out_file.display(), ?decision, "render written");
        Ok(out_file)
    }
}

/// Split a render name into its directory part and file name.
fn split_render_name(name: &str) -> Result<(&str, &str), RenderError> {
    let (dir, file) = name.rsplit_once('/').unwrap_or(("", name));
    if file.is_empty() || file == "." || file == ".." {
        return Err(RenderError::InvalidName {
            name: name.to_string(),
            reason: "has no file name",
        });
    }
    Ok((dir, file))
}

/// Join `relative` onto `base`, refusing anything that would leave `base`.
///
/// Root and `.` components are dropped so `/etc` lands at `base/etc`.
fn join_relative(base: &Path, relative: &str, name: &str) -> Result<PathBuf, RenderError> {
    let mut out = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => {
                return Err(RenderError::InvalidName {
                    name: name.to_string(),
                    reason: "escapes the output directory",
                });
            }
        }
    }
    Ok(out)
}
