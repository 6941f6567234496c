//! Recursive file and directory copying.
//!
//! Symlinks inside a copied tree are skipped, not followed or recreated.
//! Nothing is written to a temporary file first: a failure part way through
//! leaves whatever was already copied in place.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Errors from [`copy_file`] and [`copy_dir`].
#[derive(Debug, Error)]
pub enum ReplicateError {
    #[error("source is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReplicateError {
    fn io<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| {
            debug!(operation, path = %path.display(), error = %source, "copy step failed");
            Self::Io {
                operation,
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Copy one file's bytes and permission bits from `src` to `dst`.
///
/// `dst` is created or truncated and synced to disk before its permissions
/// are updated.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), ReplicateError> {
    let mut input = File::open(src).map_err(ReplicateError::io("open", src))?;
    let mut output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(ReplicateError::io("create", dst))?;

    io::copy(&mut input, &mut output).map_err(ReplicateError::io("copy to", dst))?;
    output.sync_all().map_err(ReplicateError::io("sync", dst))?;

    let permissions = input
        .metadata()
        .map_err(ReplicateError::io("stat", src))?
        .permissions();
    fs::set_permissions(dst, permissions).map_err(ReplicateError::io("set permissions on", dst))
}

/// Copy the directory tree at `src` to `dst`, which must not exist yet.
///
/// Directories are created with the permission bits of their source.
/// Entries are visited in file-name order. Any failure stops the copy and
/// nothing already copied is removed.
#[instrument(skip_all, fields(src = %src.display(), dst = %dst.display()))]
pub fn copy_dir(src: &Path, dst: &Path) -> Result<(), ReplicateError> {
    let src_meta = fs::metadata(src).map_err(ReplicateError::io("stat", src))?;
    if !src_meta.is_dir() {
        debug!(path = %src.display(), "source is not a directory");
        return Err(ReplicateError::SourceNotDirectory(src.to_path_buf()));
    }

    match fs::symlink_metadata(dst) {
        Ok(_) => {
            debug!(path = %dst.display(), "destination already exists");
            return Err(ReplicateError::DestinationExists(dst.to_path_buf()));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ReplicateError::io("stat", dst)(e)),
    }

    create_dir_like(dst, &src_meta)?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed"));
            ReplicateError::io("read", &path)(source)
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| ReplicateError::io("relativise", entry.path())(io::Error::other(e)))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            debug!(path = %entry.path().display(), "skipping symlink");
        } else if file_type.is_dir() {
            let meta = entry
                .metadata()
                .map_err(|e| ReplicateError::io("stat", entry.path())(io::Error::other(e)))?;
            create_dir_like(&target, &meta)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(files = copied, "directory copied");
    Ok(())
}

fn create_dir_like(path: &Path, source: &fs::Metadata) -> Result<(), ReplicateError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(source.permissions().mode() & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = source;
    builder
        .create(path)
        .map_err(ReplicateError::io("create directory", path))
}
